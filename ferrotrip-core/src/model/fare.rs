use std::collections::BTreeMap;

use serde::Serialize;

use super::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FareType {
    Regular,
    Student,
    Senior,
    Youth,
    Tram,
    Special,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Money {
    /// ISO 4217 code
    pub currency: String,
    pub cents: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Fare {
    pub fare: BTreeMap<FareType, Money>,
}

impl Fare {
    pub fn add_fare(&mut self, fare_type: FareType, money: Money) {
        self.fare.insert(fare_type, money);
    }

    pub fn get(&self, fare_type: FareType) -> Option<&Money> {
        self.fare.get(&fare_type)
    }
}

/// Pluggable fare computation over a whole path.
pub trait FareService: Send + Sync {
    fn cost(&self, path: &Path) -> Option<Fare>;
}
