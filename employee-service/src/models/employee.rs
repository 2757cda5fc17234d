use mongodb::bson::{oid::ObjectId, Document};
use serde::{Deserialize, Deserializer, Serialize};

/// An employee as stored in the `employees` collection.
///
/// The schema is not enforced server-side, so missing or `null` fields decode
/// to their zero values instead of failing the whole read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub salary: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub age: f64,
}

/// Decodes `null` as `T::default()`; pair with `#[serde(default)]` to cover
/// missing keys too.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl Employee {
    pub fn new(name: impl Into<String>, salary: f64, age: f64) -> Self {
        Self {
            id: None,
            name: name.into(),
            salary,
            age,
        }
    }
}

/// Fields to change on an existing employee.
///
/// A field takes part in the update only when it is `Some`, so `0` and `""`
/// are legitimate new values rather than "not provided".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PartialEmployee {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<f64>,
}

impl PartialEmployee {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.salary.is_none() && self.age.is_none()
    }

    /// Body of the `$set` operator: one entry per present field.
    pub fn to_set_document(&self) -> Document {
        let mut set = Document::new();
        if let Some(name) = &self.name {
            set.insert("name", name.clone());
        }
        if let Some(salary) = self.salary {
            set.insert("salary", salary);
        }
        if let Some(age) = self.age {
            set.insert("age", age);
        }
        set
    }

    /// Overlays the present fields onto `employee`.
    pub fn apply_to(&self, employee: &mut Employee) {
        if let Some(name) = &self.name {
            employee.name = name.clone();
        }
        if let Some(salary) = self.salary {
            employee.salary = salary;
        }
        if let Some(age) = self.age {
            employee.age = age;
        }
    }
}
