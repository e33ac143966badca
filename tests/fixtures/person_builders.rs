use std::collections::HashMap;

pub struct AddressBuilder {
    pub street: String,
    pub zip: u32,
}

impl Default for AddressBuilder {
    fn default() -> Self {
        Self {
            street: String::new(),
            zip: 0,
        }
    }
}

impl AddressBuilder {
    pub fn build(self) -> Address {
        Address {
            street: self.street,
            zip: self.zip,
        }
    }
}

#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum PersonCodingKeys {
    #[serde(rename = "full_name")]
    fullName,
    age,
    initial,
    active,
    score,
    nickname,
    tags,
    labels,
    ratings,
    home,
}

impl PersonCodingKeys {
    pub const ALL: &'static [Self] = &[
        Self::fullName,
        Self::age,
        Self::initial,
        Self::active,
        Self::score,
        Self::nickname,
        Self::tags,
        Self::labels,
        Self::ratings,
        Self::home,
    ];

    pub fn as_str(&self) -> &'static str {
        match *self {
            Self::fullName => "full_name",
            Self::age => "age",
            Self::initial => "initial",
            Self::active => "active",
            Self::score => "score",
            Self::nickname => "nickname",
            Self::tags => "tags",
            Self::labels => "labels",
            Self::ratings => "ratings",
            Self::home => "home",
        }
    }
}

pub struct PersonBuilder {
    pub fullName: String,
    pub age: i64,
    pub initial: char,
    pub active: bool,
    pub score: f64,
    pub nickname: Option<String>,
    pub tags: Vec<String>,
    pub labels: std::collections::BTreeSet<String>,
    pub ratings: HashMap<String, f64>,
    pub home: Address,
}

impl Default for PersonBuilder {
    fn default() -> Self {
        Self {
            fullName: String::new(),
            age: 0,
            initial: '\0',
            active: false,
            score: 0.0,
            nickname: None,
            tags: Vec::new(),
            labels: Default::default(),
            ratings: HashMap::new(),
            home: AddressBuilder::default().build(),
        }
    }
}

impl PersonBuilder {
    pub fn build(self) -> Person {
        Person {
            fullName: self.fullName,
            age: self.age,
            initial: self.initial,
            active: self.active,
            score: self.score,
            nickname: self.nickname,
            tags: self.tags,
            labels: self.labels,
            ratings: self.ratings,
            home: self.home,
        }
    }
}
