use serde::{Deserialize, Serialize};

/// One intermediary claimed in the chain.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SupplyChainNode {
    pub domain: String,
    pub seller_id: String,
}

impl SupplyChainNode {
    pub fn new(domain: impl Into<String>, seller_id: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            seller_id: seller_id.into(),
        }
    }

    pub fn is_complete(&self) -> bool {
        !self.domain.trim().is_empty() && !self.seller_id.trim().is_empty()
    }
}

/// Nodes that survived intake filtering, in chain order.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SupplyChain {
    nodes: Vec<SupplyChainNode>,
}

impl SupplyChain {
    /// Trims every node and silently drops those missing a domain or seller id.
    pub fn from_nodes(nodes: impl IntoIterator<Item = SupplyChainNode>) -> Self {
        let nodes = nodes
            .into_iter()
            .enumerate()
            .filter_map(|(idx, n)| {
                let n = SupplyChainNode::new(n.domain.trim(), n.seller_id.trim());
                if n.is_complete() {
                    Some(n)
                } else {
                    tracing::debug!(position = idx, "dropping incomplete chain node");
                    None
                }
            })
            .collect();
        Self { nodes }
    }

    pub fn nodes(&self) -> &[SupplyChainNode] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// A standing intermediary checked with the same rules as chain nodes but
/// reported only in the diagnostic log.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResellerIdentity {
    pub domain: String,
    pub seller_id: String,
}

impl ResellerIdentity {
    /// Builds an identity from loosely-filled request fields. Returns `None`
    /// when no seller id was supplied.
    pub fn from_fields(domain: &str, seller_id: &str) -> Option<Self> {
        let seller_id = seller_id.trim();
        let domain = domain.trim();
        if seller_id.is_empty() || domain.is_empty() {
            return None;
        }
        Some(Self {
            domain: domain.to_string(),
            seller_id: seller_id.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intake_drops_blank_fields_and_keeps_order() {
        let chain = SupplyChain::from_nodes(vec![
            SupplyChainNode::new(" b.com ", "2"),
            SupplyChainNode::new("", "9"),
            SupplyChainNode::new("c.com", "   "),
            SupplyChainNode::new("a.com", " 1"),
        ]);
        assert_eq!(
            chain.nodes(),
            &[SupplyChainNode::new("b.com", "2"), SupplyChainNode::new("a.com", "1")]
        );
    }

    #[test]
    fn reseller_requires_an_id() {
        assert!(ResellerIdentity::from_fields("pubmatic.com", "  ").is_none());
        assert!(ResellerIdentity::from_fields(" ", "156").is_none());
        let r = ResellerIdentity::from_fields(" pubmatic.com", " 156 ").unwrap();
        assert_eq!(r.domain, "pubmatic.com");
        assert_eq!(r.seller_id, "156");
    }
}
