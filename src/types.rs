//! Type descriptors: the small closed set of type shapes the engine understands
//!
//! A member's type is written as a compact expression:
//!
//! ```text
//! String          primitive (found in the primitive table)
//! Address         named record (anything else)
//! String?         optional
//! [String]        array
//! [String: Int]   dictionary
//! ```
//!
//! The long forms `Optional<T>`, `Array<T>` and `Dictionary<K, V>` (and the Rust
//! `Option<T>`, `Vec<T>`, `HashMap<K, V>`) parse to the same shapes.
//!
//! Only enough structure is kept to choose a default value; no deeper type
//! resolution happens here.

use std::fmt;
use thiserror::Error;

/// Shape of a field's declared type
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeDescriptor {
    Primitive(String),
    Optional(Box<TypeDescriptor>),
    Array(Box<TypeDescriptor>),
    Dictionary(Box<TypeDescriptor>, Box<TypeDescriptor>),
    NamedRecord(String),
}

impl TypeDescriptor {
    /// Classify a bare type name against the primitive table
    pub fn named(name: impl Into<String>) -> Self {
        let name = name.into();
        if primitive_kind(&name).is_some() {
            TypeDescriptor::Primitive(name)
        } else {
            TypeDescriptor::NamedRecord(name)
        }
    }

    pub fn optional(inner: TypeDescriptor) -> Self {
        TypeDescriptor::Optional(Box::new(inner))
    }

    pub fn array(inner: TypeDescriptor) -> Self {
        TypeDescriptor::Array(Box::new(inner))
    }

    pub fn dictionary(key: TypeDescriptor, value: TypeDescriptor) -> Self {
        TypeDescriptor::Dictionary(Box::new(key), Box::new(value))
    }

    /// Parse a type expression (`String`, `Address?`, `[Int]`, `[String: Int]`)
    pub fn parse(expr: &str) -> Result<Self, TypeParseError> {
        let mut parser = TypeParser {
            chars: expr.chars().filter(|c| !c.is_whitespace()).collect(),
            pos: 0,
        };
        if parser.chars.is_empty() {
            return Err(TypeParseError::Empty);
        }
        let ty = parser.parse_type()?;
        if parser.pos != parser.chars.len() {
            return Err(TypeParseError::Trailing(
                parser.chars[parser.pos..].iter().collect(),
            ));
        }
        Ok(ty)
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeDescriptor::Primitive(name) | TypeDescriptor::NamedRecord(name) => {
                write!(f, "{}", name)
            }
            TypeDescriptor::Optional(inner) => write!(f, "{}?", inner),
            TypeDescriptor::Array(inner) => write!(f, "[{}]", inner),
            TypeDescriptor::Dictionary(key, value) => write!(f, "[{}: {}]", key, value),
        }
    }
}

/// Type expression parse failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypeParseError {
    #[error("empty type expression")]
    Empty,

    #[error("unexpected '{found}' at offset {pos}")]
    Unexpected { found: char, pos: usize },

    #[error("unexpected end of type expression")]
    UnexpectedEnd,

    #[error("trailing input '{0}'")]
    Trailing(String),
}

struct TypeParser {
    chars: Vec<char>,
    pos: usize,
}

impl TypeParser {
    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn expect(&mut self, want: char) -> Result<(), TypeParseError> {
        match self.peek() {
            Some(c) if c == want => {
                self.pos += 1;
                Ok(())
            }
            Some(found) => Err(TypeParseError::Unexpected {
                found,
                pos: self.pos,
            }),
            None => Err(TypeParseError::UnexpectedEnd),
        }
    }

    fn parse_type(&mut self) -> Result<TypeDescriptor, TypeParseError> {
        let mut ty = match self.peek() {
            Some('[') => self.parse_collection()?,
            Some(_) => {
                let name = self.parse_name()?;
                match long_form(&name)? {
                    Some(ty) => ty,
                    None => TypeDescriptor::named(name),
                }
            }
            None => return Err(TypeParseError::UnexpectedEnd),
        };
        while self.peek() == Some('?') {
            self.pos += 1;
            ty = TypeDescriptor::optional(ty);
        }
        Ok(ty)
    }

    fn parse_collection(&mut self) -> Result<TypeDescriptor, TypeParseError> {
        self.expect('[')?;
        let element = self.parse_type()?;
        if self.peek() == Some(':') {
            self.pos += 1;
            let value = self.parse_type()?;
            self.expect(']')?;
            return Ok(TypeDescriptor::dictionary(element, value));
        }
        self.expect(']')?;
        Ok(TypeDescriptor::array(element))
    }

    /// Scan a (possibly pathed, possibly generic) type name
    ///
    /// `::` is part of a name; a lone `:` ends it. Inside `<...>` commas and
    /// nested brackets are taken verbatim.
    fn parse_name(&mut self) -> Result<String, TypeParseError> {
        let start = self.pos;
        match self.peek() {
            Some(c) if c.is_alphabetic() || c == '_' => {}
            Some(found) => return Err(TypeParseError::Unexpected { found, pos: start }),
            None => return Err(TypeParseError::UnexpectedEnd),
        }

        let mut depth = 0usize;
        let mut name = String::new();
        while let Some(c) = self.peek() {
            match c {
                '<' => depth += 1,
                '>' => {
                    if depth == 0 {
                        return Err(TypeParseError::Unexpected {
                            found: c,
                            pos: self.pos,
                        });
                    }
                    depth -= 1;
                }
                ':' if depth == 0 => {
                    if self.chars.get(self.pos + 1) == Some(&':') {
                        name.push_str("::");
                        self.pos += 2;
                        continue;
                    }
                    break;
                }
                ',' if depth > 0 => {
                    name.push_str(", ");
                    self.pos += 1;
                    continue;
                }
                '[' | ']' | '?' | ',' if depth == 0 => break,
                _ => {}
            }
            name.push(c);
            self.pos += 1;
        }

        if depth != 0 {
            return Err(TypeParseError::UnexpectedEnd);
        }
        if name.ends_with("::") {
            return Err(TypeParseError::UnexpectedEnd);
        }
        Ok(name)
    }
}

/// `Optional<T>`, `Array<T>`, `Dictionary<K, V>` and their Rust spellings
fn long_form(name: &str) -> Result<Option<TypeDescriptor>, TypeParseError> {
    let Some((base, args)) = name
        .split_once('<')
        .and_then(|(base, rest)| Some((base, rest.strip_suffix('>')?)))
    else {
        return Ok(None);
    };

    let args = split_generic_args(args);
    let ty = match (base, args.as_slice()) {
        ("Optional" | "Option", [inner]) => TypeDescriptor::optional(TypeDescriptor::parse(inner)?),
        ("Array" | "Vec", [inner]) => TypeDescriptor::array(TypeDescriptor::parse(inner)?),
        ("Dictionary" | "HashMap", [key, value]) => {
            TypeDescriptor::dictionary(TypeDescriptor::parse(key)?, TypeDescriptor::parse(value)?)
        }
        _ => return Ok(None),
    };
    Ok(Some(ty))
}

/// Split generic arguments on the commas that are not nested
pub(crate) fn split_generic_args(args: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, c) in args.char_indices() {
        match c {
            '<' | '[' => depth += 1,
            '>' | ']' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                parts.push(args[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(args[start..].trim());
    parts
}

/// Value kinds with a canonical "zero"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    String,
    Character,
    Bool,
    Int,
    Int8,
    Int16,
    Int32,
    Int64,
    UInt,
    UInt8,
    UInt16,
    UInt32,
    UInt64,
    Float,
    Double,
    CgFloat,
    Decimal,
    Date,
    Uuid,
    Url,
    Data,
    CgPoint,
    CgSize,
    CgRect,
    CgVector,
    /// Standard collections other than array and dictionary (`Set`, `BTreeMap`, ...)
    Collection,
}

impl PrimitiveKind {
    pub fn is_integer(self) -> bool {
        matches!(
            self,
            PrimitiveKind::Int
                | PrimitiveKind::Int8
                | PrimitiveKind::Int16
                | PrimitiveKind::Int32
                | PrimitiveKind::Int64
                | PrimitiveKind::UInt
                | PrimitiveKind::UInt8
                | PrimitiveKind::UInt16
                | PrimitiveKind::UInt32
                | PrimitiveKind::UInt64
        )
    }

    pub fn is_float(self) -> bool {
        matches!(
            self,
            PrimitiveKind::Float | PrimitiveKind::Double | PrimitiveKind::CgFloat
        )
    }
}

/// The primitive table: spellings from Swift and Rust sources
static PRIMITIVES: &[(&str, PrimitiveKind)] = &[
    ("String", PrimitiveKind::String),
    ("Character", PrimitiveKind::Character),
    ("char", PrimitiveKind::Character),
    ("Bool", PrimitiveKind::Bool),
    ("bool", PrimitiveKind::Bool),
    ("Int", PrimitiveKind::Int),
    ("isize", PrimitiveKind::Int),
    ("Int8", PrimitiveKind::Int8),
    ("i8", PrimitiveKind::Int8),
    ("Int16", PrimitiveKind::Int16),
    ("i16", PrimitiveKind::Int16),
    ("Int32", PrimitiveKind::Int32),
    ("i32", PrimitiveKind::Int32),
    ("Int64", PrimitiveKind::Int64),
    ("i64", PrimitiveKind::Int64),
    ("UInt", PrimitiveKind::UInt),
    ("usize", PrimitiveKind::UInt),
    ("UInt8", PrimitiveKind::UInt8),
    ("u8", PrimitiveKind::UInt8),
    ("UInt16", PrimitiveKind::UInt16),
    ("u16", PrimitiveKind::UInt16),
    ("UInt32", PrimitiveKind::UInt32),
    ("u32", PrimitiveKind::UInt32),
    ("UInt64", PrimitiveKind::UInt64),
    ("u64", PrimitiveKind::UInt64),
    ("Float", PrimitiveKind::Float),
    ("Float32", PrimitiveKind::Float),
    ("f32", PrimitiveKind::Float),
    ("Double", PrimitiveKind::Double),
    ("Float64", PrimitiveKind::Double),
    ("f64", PrimitiveKind::Double),
    ("CGFloat", PrimitiveKind::CgFloat),
    ("Decimal", PrimitiveKind::Decimal),
    ("Date", PrimitiveKind::Date),
    ("SystemTime", PrimitiveKind::Date),
    ("UUID", PrimitiveKind::Uuid),
    ("Uuid", PrimitiveKind::Uuid),
    ("URL", PrimitiveKind::Url),
    ("Url", PrimitiveKind::Url),
    ("Data", PrimitiveKind::Data),
    ("CGPoint", PrimitiveKind::CgPoint),
    ("CGSize", PrimitiveKind::CgSize),
    ("CGRect", PrimitiveKind::CgRect),
    ("CGVector", PrimitiveKind::CgVector),
    ("Set", PrimitiveKind::Collection),
    ("HashSet", PrimitiveKind::Collection),
    ("BTreeSet", PrimitiveKind::Collection),
    ("BTreeMap", PrimitiveKind::Collection),
    ("VecDeque", PrimitiveKind::Collection),
    ("BinaryHeap", PrimitiveKind::Collection),
    ("LinkedList", PrimitiveKind::Collection),
];

/// Look up a bare type name in the primitive table
///
/// Pathed names are matched on their final segment (`uuid::Uuid` → `Uuid`),
/// generic names on their base (`BTreeSet<String>` → `BTreeSet`).
pub fn primitive_kind(name: &str) -> Option<PrimitiveKind> {
    let base = name.split_once('<').map_or(name, |(base, _)| base);
    let bare = base.rsplit("::").next().unwrap_or(base);
    PRIMITIVES
        .iter()
        .find(|(spelling, _)| *spelling == bare)
        .map(|(_, kind)| *kind)
}
