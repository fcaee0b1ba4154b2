//! 房源实体

use serde::{Deserialize, Serialize};
use std::fmt;

/// 房源 ID（由数据库生成）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ListingId(pub i32);

impl fmt::Display for ListingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 已持久化的房源
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    pub id: ListingId,
    pub host_username: String,
    pub title: String,
    pub description: String,
    /// 每晚价格（整数货币单位）
    pub price: i32,
}

/// 新房源（尚未分配 ID）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewListing {
    pub host_username: String,
    pub title: String,
    pub description: String,
    pub price: i32,
}

impl NewListing {
    pub fn new(
        host_username: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
        price: i32,
    ) -> Self {
        Self {
            host_username: host_username.into(),
            title: title.into(),
            description: description.into(),
            price,
        }
    }

    /// 附上数据库生成的 ID
    pub fn with_id(self, id: ListingId) -> Listing {
        Listing {
            id,
            host_username: self.host_username,
            title: self.title,
            description: self.description,
            price: self.price,
        }
    }
}
