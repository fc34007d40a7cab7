//! In-memory swath source.

use std::collections::HashMap;
use std::path::PathBuf;

use swath_common::{Swath, SwathError, SwathResult, SwathSource};

/// Serves pre-built swaths by granule id; unknown granules are `NotFound`.
#[derive(Debug, Default, Clone)]
pub struct MemorySwathSource {
    swaths: HashMap<String, Swath>,
}

impl MemorySwathSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_swath(mut self, swath: Swath) -> Self {
        self.insert(swath);
        self
    }

    pub fn insert(&mut self, swath: Swath) {
        self.swaths.insert(swath.granule().to_string(), swath);
    }

    pub fn len(&self) -> usize {
        self.swaths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.swaths.is_empty()
    }
}

impl SwathSource for MemorySwathSource {
    fn load(&self, granule: &str) -> SwathResult<Swath> {
        self.swaths
            .get(granule)
            .cloned()
            .ok_or_else(|| SwathError::NotFound(PathBuf::from(granule)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::{create_swath, SwathSpec};

    #[test]
    fn test_lookup() {
        let source = MemorySwathSource::new()
            .with_swath(create_swath("A2019123174500", &SwathSpec::new(5, 5, 1.0)));
        assert_eq!(source.len(), 1);
        assert!(source.load("A2019123174500").is_ok());
        assert!(matches!(
            source.load("T2019123150000"),
            Err(SwathError::NotFound(_))
        ));
    }
}
