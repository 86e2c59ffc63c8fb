//! Record keys read by the label engine. Records may carry any other keys;
//! they are ignored.

pub const PRODUCT_NAME: &str = "ProductName";
pub const PRODUCT_BRAND: &str = "ProductBrand";
pub const PRODUCT_TYPE: &str = "ProductType";
pub const PRODUCT_STRAIN: &str = "ProductStrain";
pub const LINEAGE: &str = "Lineage";
pub const VENDOR: &str = "Vendor";
pub const DESCRIPTION: &str = "Description";
pub const WEIGHT: &str = "Weight";
pub const UNITS: &str = "Units";
pub const RATIO: &str = "Ratio";
pub const THC: &str = "THC";
pub const CBD: &str = "CBD";
pub const PRICE: &str = "Price";
pub const DOH: &str = "DOH";
