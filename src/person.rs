//! Identity of the user affected by an error report.
//!
//! Plain value type with no connection to the energy contract.

use std::fmt;

use serde::Serialize;
use serde_json::{Map, Value};

/// The user affected by an error.
///
/// Immutable once built; construct through [`Person::builder`] or
/// [`PersonBuilder::from`] an existing value.
///
/// # Examples
///
/// ```
/// use fl_energy::person::Person;
///
/// let person = Person::builder().id("42").email("ada@example.com").build();
/// let json = person.as_json();
///
/// assert_eq!(json.get("id").and_then(|v| v.as_str()), Some("42"));
/// assert!(!json.contains_key("username"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Person {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    email: Option<String>,
}

impl Person {
    /// Starts an empty builder.
    pub fn builder() -> PersonBuilder {
        PersonBuilder::default()
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    /// JSON object holding only the fields that are set.
    pub fn as_json(&self) -> Map<String, Value> {
        let mut values = Map::new();
        let fields = [
            ("id", &self.id),
            ("username", &self.username),
            ("email", &self.email),
        ];
        for (key, value) in fields {
            if let Some(v) = value {
                values.insert(key.to_string(), Value::String(v.clone()));
            }
        }
        values
    }
}

impl fmt::Display for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let show = |v: &Option<String>| v.clone().unwrap_or_else(|| "null".to_string());
        write!(
            f,
            "Person{{id='{}', username='{}', email='{}'}}",
            show(&self.id),
            show(&self.username),
            show(&self.email)
        )
    }
}

/// Incremental builder for [`Person`].
#[derive(Debug, Clone, Default)]
pub struct PersonBuilder {
    id: Option<String>,
    username: Option<String>,
    email: Option<String>,
}

impl PersonBuilder {
    /// The affected user's id.
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// The affected user's username.
    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// The affected user's email address.
    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn build(self) -> Person {
        Person {
            id: self.id,
            username: self.username,
            email: self.email,
        }
    }
}

impl From<&Person> for PersonBuilder {
    /// Seeds a builder with every field of an existing person.
    fn from(person: &Person) -> Self {
        Self {
            id: person.id.clone(),
            username: person.username.clone(),
            email: person.email.clone(),
        }
    }
}
