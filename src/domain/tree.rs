//! Recursion tree decoded from model output.
//!
//! The JSON comes from an untrusted producer, so decoding validates every node
//! and bounds the structure by depth and node count.

use serde::{Serialize, Serializer};
use serde_json::{Map, Value};
use tracing::{debug, instrument};

use crate::domain::error::TreeError;

/// Name substituted for nodes whose `name` is missing, null or empty.
pub const PLACEHOLDER_NAME: &str = "N/A";

/// One call in a recursion tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreeNode {
    pub name: String,
    pub children: Vec<TreeNode>,
}

/// Structural guards applied while decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeLimits {
    /// Maximum number of levels, root included
    pub max_depth: usize,
    /// Maximum number of nodes in the whole tree
    pub max_nodes: usize,
}

impl Default for TreeLimits {
    fn default() -> Self {
        Self {
            max_depth: 64,
            max_nodes: 10_000,
        }
    }
}

impl TreeNode {
    pub fn leaf(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            children: Vec::new(),
        }
    }

    pub fn new(name: impl Into<String>, children: Vec<TreeNode>) -> Self {
        Self {
            name: name.into(),
            children,
        }
    }

    /// A node without children is a base case of the recursion.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Decode a JSON document into a tree.
    #[instrument(level = "debug", skip(json))]
    pub fn from_json_str(json: &str, limits: &TreeLimits) -> Result<Self, TreeError> {
        let value: Value =
            serde_json::from_str(json).map_err(|e| TreeError::Syntax(e.to_string()))?;
        Self::from_value(&value, limits)
    }

    /// Validate an already parsed JSON value into a tree.
    pub fn from_value(value: &Value, limits: &TreeLimits) -> Result<Self, TreeError> {
        let mut decoder = Decoder {
            limits,
            node_count: 0,
        };
        let root = decoder.decode(value, "$".to_string(), 1)?;
        debug!("decoded tree with {} nodes", decoder.node_count);
        Ok(root)
    }

    /// Number of levels, root included.
    pub fn depth(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(TreeNode::depth)
            .max()
            .unwrap_or(0)
    }

    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(TreeNode::node_count).sum::<usize>()
    }

    /// Names of all leaves, left to right.
    pub fn leaf_names(&self) -> Vec<&str> {
        let mut leaves = Vec::new();
        self.collect_leaves(&mut leaves);
        leaves
    }

    fn collect_leaves<'a>(&'a self, leaves: &mut Vec<&'a str>) {
        if self.is_leaf() {
            leaves.push(&self.name);
        } else {
            for child in &self.children {
                child.collect_leaves(leaves);
            }
        }
    }
}

struct Decoder<'a> {
    limits: &'a TreeLimits,
    node_count: usize,
}

impl Decoder<'_> {
    fn decode(&mut self, value: &Value, path: String, depth: usize) -> Result<TreeNode, TreeError> {
        if depth > self.limits.max_depth {
            return Err(TreeError::TooDeep {
                limit: self.limits.max_depth,
            });
        }
        self.node_count += 1;
        if self.node_count > self.limits.max_nodes {
            return Err(TreeError::TooManyNodes {
                limit: self.limits.max_nodes,
            });
        }

        let object = value.as_object().ok_or_else(|| TreeError::Shape {
            path: path.clone(),
            reason: format!("expected object, found {}", json_type(value)),
        })?;

        let name = decode_name(object, &path)?;

        let children = match object.get("children") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => {
                let mut children = Vec::with_capacity(items.len());
                for (i, item) in items.iter().enumerate() {
                    children.push(self.decode(item, format!("{path}.children[{i}]"), depth + 1)?);
                }
                children
            }
            Some(other) => {
                return Err(TreeError::Shape {
                    path,
                    reason: format!("'children' must be an array, found {}", json_type(other)),
                })
            }
        };

        Ok(TreeNode { name, children })
    }
}

fn decode_name(object: &Map<String, Value>, path: &str) -> Result<String, TreeError> {
    match object.get("name") {
        None | Some(Value::Null) => Ok(PLACEHOLDER_NAME.to_string()),
        Some(Value::String(s)) if s.is_empty() => Ok(PLACEHOLDER_NAME.to_string()),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(other) => Err(TreeError::Shape {
            path: path.to_string(),
            reason: format!("'name' must be a string, found {}", json_type(other)),
        }),
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Result of looking for a recursion tree in a model answer.
///
/// `Absent` and `Invalid` are deliberately separate: the first means the model
/// produced no tree, the second that it produced one which does not decode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TreeOutcome {
    Absent,
    Invalid {
        #[serde(serialize_with = "serialize_display")]
        error: TreeError,
    },
    Valid {
        root: TreeNode,
    },
}

impl TreeOutcome {
    pub fn tree(&self) -> Option<&TreeNode> {
        match self {
            TreeOutcome::Valid { root } => Some(root),
            _ => None,
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, TreeOutcome::Absent)
    }

    pub fn is_invalid(&self) -> bool {
        matches!(self, TreeOutcome::Invalid { .. })
    }
}

fn serialize_display<S: Serializer>(error: &TreeError, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn decode(json: &str) -> Result<TreeNode, TreeError> {
        TreeNode::from_json_str(json, &TreeLimits::default())
    }

    #[test]
    fn given_fibonacci_tree_when_decoding_then_builds_nodes_in_order() {
        let tree = decode(
            r#"{"name":"f(4)","children":[{"name":"f(3)","children":[]},{"name":"f(2)","children":[]}]}"#,
        )
        .unwrap();

        assert_eq!(tree.name, "f(4)");
        assert_eq!(tree.children.len(), 2);
        assert!(tree.children.iter().all(TreeNode::is_leaf));
        assert_eq!(tree.leaf_names(), vec!["f(3)", "f(2)"]);
        assert_eq!(tree.depth(), 2);
        assert_eq!(tree.node_count(), 3);
    }

    #[rstest]
    #[case(r#"{"children": []}"#)]
    #[case(r#"{"name": null}"#)]
    #[case(r#"{"name": ""}"#)]
    fn given_missing_or_empty_name_when_decoding_then_uses_placeholder(#[case] json: &str) {
        let tree = decode(json).unwrap();
        assert_eq!(tree.name, PLACEHOLDER_NAME);
    }

    #[test]
    fn given_unknown_fields_when_decoding_then_ignores_them() {
        let tree = decode(r#"{"name":"f(1)","value":1,"memo":true}"#).unwrap();
        assert_eq!(tree, TreeNode::leaf("f(1)"));
    }

    #[test]
    fn given_null_children_when_decoding_then_node_is_leaf() {
        let tree = decode(r#"{"name":"f(0)","children":null}"#).unwrap();
        assert!(tree.is_leaf());
    }

    #[rstest]
    #[case(r#"{"name": "x", "children": "not-a-list"}"#, "$")]
    #[case(r#"{"name": 42}"#, "$")]
    #[case(r#"[1, 2, 3]"#, "$")]
    #[case(r#"{"name": "a", "children": [{"name": "b"}, 7]}"#, "$.children[1]")]
    fn given_wrong_shape_when_decoding_then_reports_path(#[case] json: &str, #[case] at: &str) {
        match decode(json) {
            Err(TreeError::Shape { path, .. }) => assert_eq!(path, at),
            other => panic!("expected shape error, got {:?}", other),
        }
    }

    #[test]
    fn given_malformed_json_when_decoding_then_returns_syntax_error() {
        assert!(matches!(
            decode(r#"{"name": "f(4)", "children": [ }"#),
            Err(TreeError::Syntax(_))
        ));
    }

    #[test]
    fn given_chain_deeper_than_limit_when_decoding_then_returns_too_deep() {
        let mut json = String::from(r#"{"name":"f(0)"}"#);
        for i in 1..=5 {
            json = format!(r#"{{"name":"f({i})","children":[{json}]}}"#);
        }
        let limits = TreeLimits {
            max_depth: 5,
            max_nodes: 100,
        };

        assert_eq!(
            TreeNode::from_json_str(&json, &limits),
            Err(TreeError::TooDeep { limit: 5 })
        );
        let relaxed = TreeLimits {
            max_depth: 6,
            ..limits
        };
        assert_eq!(TreeNode::from_json_str(&json, &relaxed).unwrap().depth(), 6);
    }

    #[test]
    fn given_more_nodes_than_limit_when_decoding_then_returns_too_many_nodes() {
        let json = r#"{"name":"r","children":[{"name":"a"},{"name":"b"},{"name":"c"}]}"#;
        let limits = TreeLimits {
            max_depth: 10,
            max_nodes: 3,
        };
        assert_eq!(
            TreeNode::from_json_str(json, &limits),
            Err(TreeError::TooManyNodes { limit: 3 })
        );
    }

    #[test]
    fn given_outcomes_when_serialized_then_tagged_by_status() {
        let absent = serde_json::to_value(TreeOutcome::Absent).unwrap();
        assert_eq!(absent, serde_json::json!({"status": "absent"}));

        let invalid = serde_json::to_value(TreeOutcome::Invalid {
            error: TreeError::TooDeep { limit: 3 },
        })
        .unwrap();
        assert_eq!(invalid["status"], "invalid");
        assert_eq!(invalid["error"], "tree exceeds maximum depth of 3");
    }
}
