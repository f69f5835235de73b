//! View schema: the tree describing what shape of diagram to draw

use std::fmt;

use serde::{Deserialize, Deserializer};

/// Kind of a schema element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    /// Named cluster containing its children
    Subgraph,
    /// Fixed-size node carrying an icon
    Image,
    /// Plain labelled node
    Node,
    /// Edge between previously rendered identities
    Line,
    /// Rank grouping marker, draws nothing by itself
    Group,
}

/// Overall diagram kind of a view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GraphKind {
    Subgraph,
    Group,
    Node,
    Image,
    Sequence,
}

impl fmt::Display for GraphKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GraphKind::Subgraph => write!(f, "subgraph"),
            GraphKind::Group => write!(f, "group"),
            GraphKind::Node => write!(f, "node"),
            GraphKind::Image => write!(f, "image"),
            GraphKind::Sequence => write!(f, "sequence"),
        }
    }
}

/// Layout direction (`rankdir`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum Direction {
    #[default]
    #[serde(alias = "tb")]
    TB,
    #[serde(alias = "bt")]
    BT,
    #[serde(alias = "lr")]
    LR,
    #[serde(alias = "rl")]
    RL,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::TB => write!(f, "TB"),
            Direction::BT => write!(f, "BT"),
            Direction::LR => write!(f, "LR"),
            Direction::RL => write!(f, "RL"),
        }
    }
}

/// Where an edge label is placed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelPosition {
    Middle,
    Head,
    Tail,
}

impl LabelPosition {
    fn parse(s: &str) -> Option<Self> {
        match s {
            "middle" => Some(LabelPosition::Middle),
            "head" => Some(LabelPosition::Head),
            "tail" => Some(LabelPosition::Tail),
            _ => None,
        }
    }

    /// DOT attribute carrying the label at this position
    pub fn attribute(self) -> &'static str {
        match self {
            LabelPosition::Middle => "label",
            LabelPosition::Head => "headlabel",
            LabelPosition::Tail => "taillabel",
        }
    }
}

/// One node of the view schema.
///
/// The text-valued selectors (`display_expression`, `filter_values`,
/// `shapes`, `styles`) are kept as they are stored: JSON text that is parsed
/// on use, so that malformed text degrades to defaults instead of rejecting
/// the whole view.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SchemaNode {
    #[serde(rename = "graph_type")]
    pub kind: ElementKind,

    /// Field on the parent record holding this element's records
    #[serde(default, deserialize_with = "null_as_default")]
    pub data_name: String,

    /// JSON array of quoted literals and field paths
    #[serde(default, deserialize_with = "null_as_default")]
    pub display_expression: String,

    #[serde(rename = "graph_filter_data", default, deserialize_with = "null_as_default")]
    pub filter_field: String,

    /// JSON array of allowed values for `filter_field`
    #[serde(rename = "graph_filter_values", default, deserialize_with = "null_as_default")]
    pub filter_values: String,

    #[serde(rename = "graph_shape_data", default, deserialize_with = "null_as_default")]
    pub shape_field: String,

    /// Value→shape JSON object, or a literal shape when `shape_field` is empty
    #[serde(rename = "graph_shapes", default, deserialize_with = "null_as_default")]
    pub shapes: String,

    #[serde(rename = "graph_config_data", default, deserialize_with = "null_as_default")]
    pub style_field: String,

    /// Value→style JSON object, or a literal style when `style_field` is empty
    #[serde(rename = "graph_configs", default, deserialize_with = "null_as_default")]
    pub styles: String,

    #[serde(rename = "line_start_data", default, deserialize_with = "null_as_default")]
    pub line_start_field: String,

    #[serde(rename = "line_end_data", default, deserialize_with = "null_as_default")]
    pub line_end_field: String,

    #[serde(rename = "line_display_position", default, deserialize_with = "null_as_default")]
    pub line_position: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub node_group_name: String,

    /// CI type, the key for the image lookup
    #[serde(default, deserialize_with = "null_as_default")]
    pub ci_type: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub children: Vec<SchemaNode>,
}

impl SchemaNode {
    /// Create an element of the given kind with every selector unset
    pub fn new(kind: ElementKind) -> Self {
        Self {
            kind,
            data_name: String::new(),
            display_expression: String::new(),
            filter_field: String::new(),
            filter_values: String::new(),
            shape_field: String::new(),
            shapes: String::new(),
            style_field: String::new(),
            styles: String::new(),
            line_start_field: String::new(),
            line_end_field: String::new(),
            line_position: String::new(),
            node_group_name: String::new(),
            ci_type: String::new(),
            children: vec![],
        }
    }

    /// Whether records of this element also describe an edge
    pub fn has_endpoints(&self) -> bool {
        !self.line_start_field.is_empty() && !self.line_end_field.is_empty()
    }

    pub fn label_position(&self) -> Option<LabelPosition> {
        LabelPosition::parse(&self.line_position)
    }
}

/// A complete view: diagram kind, direction and the root schema element
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SchemaQuery {
    #[serde(rename = "view_graph_type")]
    pub kind: GraphKind,

    #[serde(rename = "graph_dir", default)]
    pub direction: Direction,

    /// Raw rank-grouping directive for group views
    #[serde(default, deserialize_with = "null_as_default")]
    pub node_groups: String,

    #[serde(rename = "root_data")]
    pub root: SchemaNode,
}

impl SchemaQuery {
    pub fn new(kind: GraphKind, root: SchemaNode) -> Self {
        Self {
            kind,
            direction: Direction::default(),
            node_groups: String::new(),
            root,
        }
    }

    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
