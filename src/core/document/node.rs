use indexmap::IndexMap;
use serde_yaml::Value;

/// Ordered string-keyed mapping used for every mapping node in a document.
pub type Mapping = IndexMap<String, Node>;

/// Generic document tree shared by the loader, the upgrade passes and the emitter.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Mapping(Mapping),
    Sequence(Vec<Node>),
    Scalar(Scalar),
}

/// Leaf values. `Literal` is a string the emitter renders as a `|-` block.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Null,
    Bool(bool),
    Number(serde_yaml::Number),
    String(String),
    Literal(String),
}

impl Node {
    pub fn string<T: Into<String>>(value: T) -> Self {
        Node::Scalar(Scalar::String(value.into()))
    }

    pub fn null() -> Self {
        Node::Scalar(Scalar::Null)
    }

    pub fn empty_mapping() -> Self {
        Node::Mapping(Mapping::new())
    }

    /// String content of `String` and `Literal` scalars.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Node::Scalar(Scalar::String(text)) | Node::Scalar(Scalar::Literal(text)) => {
                Some(text.as_str())
            }
            _ => None,
        }
    }

    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Node::Mapping(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_mapping_mut(&mut self) -> Option<&mut Mapping> {
        match self {
            Node::Mapping(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[Node]> {
        match self {
            Node::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// The `null` member of a type union, written either as the string `"null"`
    /// or as a bare YAML null.
    pub fn is_null_marker(&self) -> bool {
        matches!(self, Node::Scalar(Scalar::Null)) || self.as_str() == Some("null")
    }

    /// Plain type names are strings; everything else is a structured type.
    pub fn is_plain_name(&self) -> bool {
        self.as_str().is_some()
    }

    /// Look up `key` when this node is a mapping.
    pub fn get(&self, key: &str) -> Option<&Node> {
        self.as_mapping().and_then(|map| map.get(key))
    }
}

impl Default for Node {
    fn default() -> Self {
        Node::null()
    }
}

impl From<&str> for Node {
    fn from(value: &str) -> Self {
        Node::string(value)
    }
}

impl From<String> for Node {
    fn from(value: String) -> Self {
        Node::string(value)
    }
}

impl From<Mapping> for Node {
    fn from(value: Mapping) -> Self {
        Node::Mapping(value)
    }
}

impl From<Vec<Node>> for Node {
    fn from(value: Vec<Node>) -> Self {
        Node::Sequence(value)
    }
}

impl From<Value> for Node {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Node::null(),
            Value::Bool(flag) => Node::Scalar(Scalar::Bool(flag)),
            Value::Number(number) => Node::Scalar(Scalar::Number(number)),
            Value::String(text) => Node::string(text),
            Value::Sequence(items) => Node::Sequence(items.into_iter().map(Node::from).collect()),
            Value::Mapping(map) => Node::Mapping(
                map.into_iter()
                    .map(|(key, value)| (key_text(key), Node::from(value)))
                    .collect(),
            ),
            Value::Tagged(tagged) => Node::from(tagged.value),
        }
    }
}

/// Render a YAML mapping key as the string used in the document tree.
fn key_text(key: Value) -> String {
    match key {
        Value::String(text) => text,
        Value::Null => "null".to_string(),
        Value::Bool(flag) => flag.to_string(),
        Value::Number(number) => number.to_string(),
        Value::Tagged(tagged) => key_text(tagged.value),
        complex => serde_yaml::to_string(&complex)
            .map(|text| text.trim_end().to_string())
            .unwrap_or_default(),
    }
}
