use bson::oid::ObjectId;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::errors::Result;
use crate::hanzi::{HanziGenerator, LegacyCodec};

/// Sample document stored by the demo. `age` is a double so documents that
/// hold it as an int32, int64 or double all read back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub age: f64,
    pub sex: bool,
}

impl Person {
    /// A person with a generated name, an age in `[1, 100)` and `sex` set
    /// for even ages.
    pub fn random<C, R>(generator: &mut HanziGenerator<C, R>, name_length: usize) -> Result<Self>
    where
        C: LegacyCodec,
        R: Rng,
    {
        let age: i32 = generator.rng_mut().gen_range(1..100);
        let name = generator.generate(name_length)?;
        Ok(Self {
            id: None,
            name,
            age: f64::from(age),
            sex: age % 2 == 0,
        })
    }
}
