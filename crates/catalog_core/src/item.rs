use std::fmt;

/// Opaque server-assigned item identifier.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ItemId(String);

impl ItemId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The fixed category set served by the catalog API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    AirPurifying,
    AromaticFragrant,
    InsectRepellent,
    Medicinal,
    LowMaintenance,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::AirPurifying,
        Category::AromaticFragrant,
        Category::InsectRepellent,
        Category::Medicinal,
        Category::LowMaintenance,
    ];

    /// The wire/display string, exactly as the API stores it.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::AirPurifying => "Air Purifying Plants",
            Category::AromaticFragrant => "Aromatic Fragrant Plants",
            Category::InsectRepellent => "Insect Repellent Plants",
            Category::Medicinal => "Medicinal Plants",
            Category::LowMaintenance => "Low Maintenance Plants",
        }
    }

    pub fn parse(value: &str) -> Option<Category> {
        Category::ALL.iter().copied().find(|c| c.as_str() == value)
    }
}

/// Promotional tag attached to some items.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromoTag {
    Sale,
    NewArrival,
    BestSeller,
    SoldOut,
}

impl PromoTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            PromoTag::Sale => "Sale",
            PromoTag::NewArrival => "New Arrival",
            PromoTag::BestSeller => "Best Seller",
            PromoTag::SoldOut => "Sold Out",
        }
    }

    pub fn parse(value: &str) -> Option<PromoTag> {
        [
            PromoTag::Sale,
            PromoTag::NewArrival,
            PromoTag::BestSeller,
            PromoTag::SoldOut,
        ]
        .iter()
        .copied()
        .find(|tag| tag.as_str() == value)
    }
}

/// Price ordering requested from the server. Absent means server default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    PriceAsc,
    PriceDesc,
}

impl SortOrder {
    /// Query-parameter value understood by the listing endpoint.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::PriceAsc => "priceAsc",
            SortOrder::PriceDesc => "priceDesc",
        }
    }

    pub fn parse(value: &str) -> Option<SortOrder> {
        match value {
            "priceAsc" => Some(SortOrder::PriceAsc),
            "priceDesc" => Some(SortOrder::PriceDesc),
            _ => None,
        }
    }
}

/// One catalog entry as accumulated by the loader.
///
/// `category` is `None` when the server sent a string outside the fixed set;
/// the row renders as "N/A" rather than dropping the item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    /// Server-formatted display price; never parsed client-side.
    pub price: String,
    pub category: Option<Category>,
    pub status: Option<PromoTag>,
    pub description: String,
    /// Server-side image filename/key, when an image was uploaded.
    pub image: Option<String>,
}
