use crate::records::RecordType;

/// Which record types have been found so far. Flags only ever go from `false` to `true`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DiscoveryState {
    a_found: bool,
    ns_found: bool,
    mx_found: bool,
}

impl DiscoveryState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_found(&self, ty: RecordType) -> bool {
        match ty {
            RecordType::A => self.a_found,
            RecordType::NS => self.ns_found,
            RecordType::MX => self.mx_found,
        }
    }

    pub(crate) fn mark_found(&mut self, ty: RecordType) {
        match ty {
            RecordType::A => self.a_found = true,
            RecordType::NS => self.ns_found = true,
            RecordType::MX => self.mx_found = true,
        }
    }

    pub fn all_found(&self) -> bool {
        self.a_found && self.ns_found && self.mx_found
    }

    /// Record types still missing, in probe order.
    pub fn missing(&self) -> Vec<RecordType> {
        RecordType::ALL.into_iter().filter(|ty| !self.is_found(*ty)).collect()
    }
}
