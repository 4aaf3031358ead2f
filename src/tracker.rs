use crate::{
    dns::Resolver,
    notify::Notifier,
    records::{
        CheckResult,
        Record,
        RecordType,
    },
    state::DiscoveryState,
};

/// Probes the record types that are still missing and announces the ones that show up.
///
/// The tracker itself is stateless; the [`DiscoveryState`] it updates is owned by the caller.
pub struct Tracker<'a> {
    domain: &'a str,
    resolver: &'a dyn Resolver,
    notifier: &'a dyn Notifier,
}

impl<'a> Tracker<'a> {
    pub fn new(domain: &'a str, resolver: &'a dyn Resolver, notifier: &'a dyn Notifier) -> Self {
        Self {
            domain,
            resolver,
            notifier,
        }
    }

    pub fn domain(&self) -> &str {
        self.domain
    }

    /// Looks up `ty` once. On a non-empty answer a notification is sent and the flag is set, whether or not the
    /// notification went through. Returns [`CheckResult::NotFound`] without querying if `ty` was already found.
    pub async fn attempt(&self, state: &mut DiscoveryState, ty: RecordType) -> CheckResult {
        let domain = self.domain;

        if state.is_found(ty) {
            trace!(%ty, "already found, skipping");
            return CheckResult::NotFound;
        }

        info!("Checking {ty} records for {domain}...");

        let result = match self.resolver.lookup(domain, ty).await {
            Ok(records) if records.is_empty() => {
                debug!(%ty, ?domain, "no records yet");
                CheckResult::NotFound
            }
            Ok(records) => CheckResult::Found(records),
            Err(err) => {
                warn!("Failed to resolve {ty} records for {domain}: {err}");
                CheckResult::NotFound
            }
        };

        if let CheckResult::Found(records) = &result {
            info!("Found {ty} records! Sending notification.");
            let text = found_message(domain, ty, records);
            self.send(&text).await;
            state.mark_found(ty);
        }

        result
    }

    /// One pass over every missing record type, in probe order. Returns the types found in this pass.
    pub async fn tick(&self, state: &mut DiscoveryState) -> Vec<RecordType> {
        let mut found = Vec::new();
        for ty in RecordType::ALL {
            if !state.is_found(ty) && self.attempt(state, ty).await.is_found() {
                found.push(ty);
            }
        }
        found
    }

    pub async fn send_summary(&self) {
        self.send(&summary_message(self.domain)).await;
    }

    async fn send(&self, text: &str) {
        if let Err(err) = self.notifier.notify(text).await {
            error!("Error sending Telegram notification: {err}");
        }
    }
}

pub fn found_message(domain: &str, ty: RecordType, records: &[Record]) -> String {
    let mut text = format!("✅ *{ty} records found for {domain}*\n");
    for record in records {
        text.push_str(&record.markdown_line());
    }
    text
}

pub fn summary_message(domain: &str) -> String {
    format!("✅ *All records found for {domain}*!")
}
