use crate::records::{
    Record,
    RecordType,
};
use async_trait::async_trait;
use rsdns::{
    clients::{
        tokio::Client,
        ClientConfig,
        ProtocolStrategy,
    },
    records::{
        data::{
            Mx,
            Ns,
            A,
        },
        Class,
    },
};
use std::{
    net::SocketAddr,
    time::Duration,
};

/// Upper bound for a single lookup, including retransmissions.
pub const QUERY_LIFETIME: Duration = Duration::from_secs(10);

#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("dns query for {ty} {qname:?} failed: {source}")]
    Query {
        qname: String,
        ty: RecordType,
        #[source]
        source: rsdns::Error,
    },

    #[error("dns query for {ty} {qname:?} timed out")]
    Timeout { qname: String, ty: RecordType },
}

/// Answers "which records of this type does the domain currently have?".
#[async_trait]
pub trait Resolver: Send + Sync {
    async fn lookup(&self, qname: &str, ty: RecordType) -> Result<Vec<Record>, LookupError>;
}

/// Queries a single nameserver over UDP.
#[derive(Debug, Clone)]
pub struct NameserverResolver {
    nameserver: SocketAddr,
}

impl NameserverResolver {
    pub fn new(nameserver: SocketAddr) -> Self {
        Self { nameserver }
    }

    fn client_config(&self) -> ClientConfig {
        ClientConfig::with_nameserver(self.nameserver)
            .set_protocol_strategy(ProtocolStrategy::Udp)
            .set_query_lifetime(QUERY_LIFETIME)
    }

    async fn query(&self, qname: &str, ty: RecordType) -> rsdns::Result<Vec<Record>> {
        let mut client = Client::new(self.client_config()).await?;

        let records = match ty {
            RecordType::A => {
                let result = client.query_rrset::<A>(qname, Class::IN).await?;
                result.rdata.iter().map(|a| Record::A(a.address)).collect()
            }
            RecordType::NS => {
                let result = client.query_rrset::<Ns>(qname, Class::IN).await?;
                result
                    .rdata
                    .iter()
                    .map(|ns| Record::Ns {
                        host: fully_qualified(ns.nsdname.to_string()),
                    })
                    .collect()
            }
            RecordType::MX => {
                let result = client.query_rrset::<Mx>(qname, Class::IN).await?;
                result
                    .rdata
                    .iter()
                    .map(|mx| Record::Mx {
                        host: fully_qualified(mx.exchange.to_string()),
                        preference: mx.preference,
                    })
                    .collect()
            }
        };

        Ok(records)
    }
}

fn fully_qualified(mut host: String) -> String {
    if !host.ends_with('.') {
        host.push('.');
    }
    host
}

#[async_trait]
impl Resolver for NameserverResolver {
    async fn lookup(&self, qname: &str, ty: RecordType) -> Result<Vec<Record>, LookupError> {
        debug!(?qname, %ty, nameserver = %self.nameserver, "DNS record lookup...");

        // The query lifetime does not cover socket setup.
        match tokio::time::timeout(QUERY_LIFETIME, self.query(qname, ty)).await {
            Ok(result) => result.map_err(|source| LookupError::Query {
                qname: qname.to_string(),
                ty,
                source,
            }),
            Err(_) => Err(LookupError::Timeout {
                qname: qname.to_string(),
                ty,
            }),
        }
    }
}
