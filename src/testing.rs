//! In-memory resolver and notifier used by the unit tests.

use crate::{
    dns::{
        LookupError,
        Resolver,
    },
    notify::{
        Notifier,
        NotifyError,
    },
    records::{
        Record,
        RecordType,
    },
};
use async_trait::async_trait;
use std::{
    collections::{
        HashMap,
        VecDeque,
    },
    net::Ipv4Addr,
    sync::Mutex,
};

#[derive(Debug, Clone)]
pub enum Answer {
    Records(Vec<Record>),
    Fail,
}

/// Plays back one scripted answer per lookup and record type. The last answer repeats once the script runs out; a
/// type without a script always resolves to nothing.
#[derive(Default)]
pub struct ScriptedResolver {
    scripts: Mutex<HashMap<RecordType, VecDeque<Answer>>>,
    calls: Mutex<Vec<RecordType>>,
}

impl ScriptedResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn script(self, ty: RecordType, answers: impl IntoIterator<Item = Answer>) -> Self {
        self.scripts.lock().unwrap().insert(ty, answers.into_iter().collect());
        self
    }

    pub fn calls(&self) -> Vec<RecordType> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_for(&self, ty: RecordType) -> usize {
        self.calls().into_iter().filter(|it| *it == ty).count()
    }
}

#[async_trait]
impl Resolver for ScriptedResolver {
    async fn lookup(&self, qname: &str, ty: RecordType) -> Result<Vec<Record>, LookupError> {
        self.calls.lock().unwrap().push(ty);

        let answer = {
            let mut scripts = self.scripts.lock().unwrap();
            match scripts.get_mut(&ty) {
                Some(script) if script.len() > 1 => script.pop_front(),
                Some(script) => script.front().cloned(),
                None => None,
            }
        };

        match answer {
            Some(Answer::Records(records)) => Ok(records),
            Some(Answer::Fail) => Err(LookupError::Timeout {
                qname: qname.to_string(),
                ty,
            }),
            None => Ok(vec![]),
        }
    }
}

/// Records every message. Messages containing `fail_on` are recorded and then rejected with a 500.
#[derive(Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<String>>,
    fail_on: Option<&'static str>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_on(fragment: &'static str) -> Self {
        Self {
            fail_on: Some(fragment),
            ..Default::default()
        }
    }

    pub fn sent(&self) -> Vec<String> {
        self.sent.lock().unwrap().clone()
    }

    pub fn count_containing(&self, fragment: &str) -> usize {
        self.sent().iter().filter(|it| it.contains(fragment)).count()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn notify(&self, text: &str) -> Result<(), NotifyError> {
        self.sent.lock().unwrap().push(text.to_string());
        match self.fail_on {
            Some(fragment) if text.contains(fragment) => Err(NotifyError::Status {
                status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
                body: "internal error".to_string(),
            }),
            _ => Ok(()),
        }
    }
}

pub fn a(ip: [u8; 4]) -> Record {
    Record::A(Ipv4Addr::from(ip))
}

pub fn ns(host: &str) -> Record {
    Record::Ns { host: host.to_string() }
}

pub fn mx(host: &str, preference: u16) -> Record {
    Record::Mx {
        host: host.to_string(),
        preference,
    }
}
