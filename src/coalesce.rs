/// Holds at most one request until the next refresh.
///
/// Scheduling while a request is pending cancels it in favour of the newer
/// value, so a burst of signals inside one refresh interval has exactly one
/// effect.
#[derive(Debug)]
pub struct Coalesced<T> {
    pending: Option<T>,
}

impl<T> Coalesced<T> {
    pub fn new() -> Self {
        Self { pending: None }
    }

    /// Returns `true` when an older pending request was superseded
    pub fn schedule(&mut self, value: T) -> bool {
        self.pending.replace(value).is_some()
    }

    #[cfg(test)]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn flush(&mut self) -> Option<T> {
        self.pending.take()
    }
}

impl<T> Default for Coalesced<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newest_request_wins() {
        let mut request = Coalesced::new();
        assert!(!request.schedule(1));
        assert!(request.schedule(2));
        assert!(request.schedule(3));
        assert!(request.is_pending());

        assert_eq!(request.flush(), Some(3));
        assert!(!request.is_pending());
        assert_eq!(request.flush(), None);
    }
}
