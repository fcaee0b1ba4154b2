//! 房源服务

use std::sync::Arc;

use sharebnb_errors::AppResult;
use tracing::{debug, info, instrument};

use crate::domain::listing::{Listing, ListingId, NewListing};
use crate::domain::repositories::ListingRepository;

/// 房源的创建与查询
///
/// 不做输入校验，由调用方负责。
#[derive(Clone)]
pub struct ListingService {
    listings: Arc<dyn ListingRepository>,
}

impl ListingService {
    pub fn new(listings: Arc<dyn ListingRepository>) -> Self {
        Self { listings }
    }

    /// 新增房源，返回包含生成 ID 的记录
    #[instrument(skip(self, description))]
    pub async fn add_listing(
        &self,
        host_username: &str,
        title: &str,
        description: &str,
        price: i32,
    ) -> AppResult<Listing> {
        let listing = self
            .listings
            .insert(&NewListing::new(host_username, title, description, price))
            .await?;

        info!(listing_id = %listing.id, "Listing created");
        Ok(listing)
    }

    /// 查询全部房源
    pub async fn get_listings(&self) -> AppResult<Vec<Listing>> {
        let listings = self.listings.find_all().await?;
        debug!(count = listings.len(), "Listings fetched");
        Ok(listings)
    }

    /// 根据 ID 查询房源，不存在时返回 `None`
    pub async fn get_listing(&self, id: ListingId) -> AppResult<Option<Listing>> {
        self.listings.find_by_id(id).await
    }
}
