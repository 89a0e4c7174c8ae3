use serde::{Deserialize, Serialize};

/// Typed reference from an entry field to another platform resource.
///
/// Serializes to the management API's wire shape:
/// `{ "sys": { "type": "Link", "linkType": "Asset", "id": "..." } }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub sys: LinkSys,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkSys {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(rename = "linkType")]
    pub link_type: String,
    pub id: String,
}

impl Link {
    /// Link pointing at the asset with `id`.
    #[must_use]
    pub fn asset(id: impl Into<String>) -> Self {
        Self {
            sys: LinkSys {
                kind: "Link".to_string(),
                link_type: "Asset".to_string(),
                id: id.into(),
            },
        }
    }

    /// Wire representation as a JSON value.
    #[must_use]
    pub fn to_value(&self) -> serde_json::Value {
        serde_json::json!({
            "sys": {
                "type": self.sys.kind,
                "linkType": self.sys.link_type,
                "id": self.sys.id,
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn asset_link_wire_shape() {
        let link = Link::asset("asset-1");
        let value = serde_json::to_value(&link).unwrap();
        assert_eq!(value["sys"]["type"], "Link");
        assert_eq!(value["sys"]["linkType"], "Asset");
        assert_eq!(value["sys"]["id"], "asset-1");
        assert_eq!(value, link.to_value());
    }
}
