use crate::chain::model::SupplyChainNode;
use crate::error::{CoreError, CoreResult};
use crate::registry::model::coerce_scalar;
use serde_json::{Map, Value};

/// Decodes a chain description into raw nodes (before intake filtering).
///
/// Accepted shapes:
/// - `{"schain": [{"seller_url": .., "seller_id": ..}, ..]}`
/// - `{"schain": {"nodes": [..]}}` and `{"nodes": [{"asi": .., "sid": ..}, ..]}`
///
/// A description with no node list at all is an empty chain. Anything
/// structurally off (not an object, a non-array node list, a node that is not
/// an object, a non-text domain) is `InputMalformed`.
pub fn parse_supply_chain(raw: &str) -> CoreResult<Vec<SupplyChainNode>> {
    let doc: Value =
        serde_json::from_str(raw).map_err(|e| CoreError::InputMalformed(e.to_string()))?;
    let root = doc
        .as_object()
        .ok_or_else(|| CoreError::InputMalformed("expected a JSON object".to_string()))?;

    let nodes = match node_list(root)? {
        Some(n) => n,
        None => return Ok(Vec::new()),
    };

    nodes
        .iter()
        .enumerate()
        .map(|(idx, node)| parse_node(idx, node))
        .collect()
}

fn node_list(root: &Map<String, Value>) -> CoreResult<Option<&Vec<Value>>> {
    match root.get("schain") {
        Some(Value::Array(a)) => return Ok(Some(a)),
        Some(Value::Object(inner)) => return expect_array(inner.get("nodes"), "schain.nodes"),
        Some(Value::Null) | None => {}
        Some(_) => {
            return Err(CoreError::InputMalformed(
                "`schain` must be a list of nodes".to_string(),
            ))
        }
    }
    expect_array(root.get("nodes"), "nodes")
}

fn expect_array<'a>(v: Option<&'a Value>, what: &str) -> CoreResult<Option<&'a Vec<Value>>> {
    match v {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Array(a)) => Ok(Some(a)),
        Some(_) => Err(CoreError::InputMalformed(format!(
            "`{}` must be a list of nodes",
            what
        ))),
    }
}

fn parse_node(idx: usize, node: &Value) -> CoreResult<SupplyChainNode> {
    let obj = node
        .as_object()
        .ok_or_else(|| CoreError::InputMalformed(format!("node {} is not an object", idx)))?;

    let domain = match first_present(obj, &["seller_url", "asi"]) {
        None => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(_) => {
            return Err(CoreError::InputMalformed(format!(
                "node {}: seller domain must be a string",
                idx
            )))
        }
    };

    let seller_id = match first_present(obj, &["seller_id", "sid"]) {
        None => String::new(),
        Some(v) => coerce_scalar(v).ok_or_else(|| {
            CoreError::InputMalformed(format!("node {}: seller id must be a scalar", idx))
        })?,
    };

    Ok(SupplyChainNode::new(domain, seller_id))
}

/// First key holding a non-null value.
fn first_present<'a>(obj: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|k| obj.get(*k))
        .find(|v| !v.is_null())
}
