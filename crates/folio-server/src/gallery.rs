//! Partitioning of a page's image rows into the slots each page renders.
//!
//! Classification is exact string equality on the row's slot type. Rows
//! whose type matches no slot of the page (or is null) are dropped.

use folio_core::slot;
use folio_db::models::ImageRecord;
use serde::Serialize;
use utoipa::ToSchema;

/// An image row as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ImageResponse {
    pub id: i64,
    pub url: String,
    #[serde(rename = "type")]
    pub slot_type: Option<String>,
    /// Page tags.
    pub page: Vec<String>,
}

impl ImageResponse {
    pub fn from_model(record: &ImageRecord) -> Self {
        Self {
            id: record.id,
            url: record.url.clone(),
            slot_type: record.slot_type.clone(),
            page: record.pages.clone(),
        }
    }
}

/// First row (in id order) carrying `slot_type`.
fn first_of(records: &[ImageRecord], slot_type: &str) -> Option<ImageResponse> {
    records
        .iter()
        .find(|r| r.has_slot(slot_type))
        .map(ImageResponse::from_model)
}

/// Every row carrying `slot_type`, in input order.
fn all_of(records: &[ImageRecord], slot_type: &str) -> Vec<ImageResponse> {
    records
        .iter()
        .filter(|r| r.has_slot(slot_type))
        .map(ImageResponse::from_model)
        .collect()
}

/// Slots of the home page. Absent single slots are omitted from the JSON.
#[derive(Debug, Default, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HomeImages {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slider_image: Option<ImageResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub container_image_first: Option<ImageResponse>,
    pub feature_work_image: Vec<ImageResponse>,
    pub logos_brand_image: Vec<ImageResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub container_image_second: Option<ImageResponse>,
    pub footer_image: Vec<ImageResponse>,
    pub container_footer_image: Vec<ImageResponse>,
}

impl HomeImages {
    pub fn from_records(records: &[ImageRecord]) -> Self {
        Self {
            slider_image: first_of(records, slot::SLIDER),
            container_image_first: first_of(records, slot::CONTAINER_FIRST),
            feature_work_image: all_of(records, slot::FEATURE_WORK),
            logos_brand_image: all_of(records, slot::LOGOS_BRAND),
            container_image_second: first_of(records, slot::CONTAINER_SECOND),
            footer_image: all_of(records, slot::FOOTER),
            container_footer_image: all_of(records, slot::CONTAINER_FOOTER),
        }
    }
}

/// Slots of the about page.
#[derive(Debug, Default, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AboutImages {
    pub container_left_image: Vec<ImageResponse>,
    pub container_right_image: Vec<ImageResponse>,
    pub footer_image: Vec<ImageResponse>,
    pub container_footer_image: Vec<ImageResponse>,
}

impl AboutImages {
    pub fn from_records(records: &[ImageRecord]) -> Self {
        Self {
            container_left_image: all_of(records, slot::CONTAINER_LEFT_ABOUT),
            container_right_image: all_of(records, slot::CONTAINER_RIGHT_ABOUT),
            footer_image: all_of(records, slot::FOOTER),
            container_footer_image: all_of(records, slot::CONTAINER_FOOTER),
        }
    }
}

/// Columns of the work page.
#[derive(Debug, Default, Serialize, ToSchema)]
pub struct WorkImages {
    pub column1: Vec<ImageResponse>,
    pub column2: Vec<ImageResponse>,
    pub column3: Vec<ImageResponse>,
    pub column4: Vec<ImageResponse>,
}

impl WorkImages {
    pub fn from_records(records: &[ImageRecord]) -> Self {
        Self {
            column1: all_of(records, slot::COLUMN1),
            column2: all_of(records, slot::COLUMN2),
            column3: all_of(records, slot::COLUMN3),
            column4: all_of(records, slot::COLUMN4),
        }
    }
}
