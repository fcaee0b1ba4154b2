//! 房源 Repository trait

use async_trait::async_trait;
use sharebnb_errors::AppResult;

use crate::domain::listing::{Listing, ListingId, NewListing};

#[async_trait]
pub trait ListingRepository: Send + Sync {
    /// 插入房源，返回包含生成 ID 的完整记录
    async fn insert(&self, listing: &NewListing) -> AppResult<Listing>;

    /// 查询全部房源（不保证顺序）
    async fn find_all(&self) -> AppResult<Vec<Listing>>;

    /// 根据 ID 查找
    async fn find_by_id(&self, id: ListingId) -> AppResult<Option<Listing>>;
}
