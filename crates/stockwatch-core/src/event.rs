/// Per-cycle availability determination for one watched store.
///
/// Produced fresh on every cycle for every watched store present in the
/// snapshot, then discarded once reported and dispatched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvailabilityEvent {
    pub store_id: String,
    pub name: String,
    pub address: String,
    pub available: bool,
}
