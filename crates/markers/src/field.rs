use std::fmt;

/// A semantic field that carries its own marker pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MarkerField {
    ProductBrand,
    ProductType,
    ProductStrain,
    Lineage,
    Vendor,
    /// Description joined with weight and units.
    Description,
    Ratio,
    Price,
}

impl MarkerField {
    pub const ALL: [MarkerField; 8] = [
        MarkerField::ProductBrand,
        MarkerField::ProductType,
        MarkerField::ProductStrain,
        MarkerField::Lineage,
        MarkerField::Vendor,
        MarkerField::Description,
        MarkerField::Ratio,
        MarkerField::Price,
    ];

    pub fn tag(self) -> &'static str {
        match self {
            MarkerField::ProductBrand => "PRODUCTBRAND",
            MarkerField::ProductType => "PRODUCTTYPE",
            MarkerField::ProductStrain => "PRODUCTSTRAIN",
            MarkerField::Lineage => "LINEAGE",
            MarkerField::Vendor => "VENDOR",
            MarkerField::Description => "DESC",
            MarkerField::Ratio => "RATIO",
            MarkerField::Price => "PRICE",
        }
    }

    pub fn start_token(self) -> &'static str {
        match self {
            MarkerField::ProductBrand => "PRODUCTBRAND_START",
            MarkerField::ProductType => "PRODUCTTYPE_START",
            MarkerField::ProductStrain => "PRODUCTSTRAIN_START",
            MarkerField::Lineage => "LINEAGE_START",
            MarkerField::Vendor => "VENDOR_START",
            MarkerField::Description => "DESC_START",
            MarkerField::Ratio => "RATIO_START",
            MarkerField::Price => "PRICE_START",
        }
    }

    pub fn end_token(self) -> &'static str {
        match self {
            MarkerField::ProductBrand => "PRODUCTBRAND_END",
            MarkerField::ProductType => "PRODUCTTYPE_END",
            MarkerField::ProductStrain => "PRODUCTSTRAIN_END",
            MarkerField::Lineage => "LINEAGE_END",
            MarkerField::Vendor => "VENDOR_END",
            MarkerField::Description => "DESC_END",
            MarkerField::Ratio => "RATIO_END",
            MarkerField::Price => "PRICE_END",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.tag() == tag)
    }

    /// Regex alternation of every tag, longest first.
    pub(crate) fn tag_alternation() -> String {
        let mut tags: Vec<&str> = Self::ALL.iter().map(|f| f.tag()).collect();
        tags.sort_by_key(|t| std::cmp::Reverse(t.len()));
        tags.join("|")
    }

    /// Regex alternation of every tag and every tail of a tag (`EAGE`,
    /// `CE`), longest first.
    pub(crate) fn tag_suffix_alternation() -> String {
        let mut suffixes: Vec<&str> = Self::ALL
            .iter()
            .flat_map(|f| {
                let tag = f.tag();
                (0..tag.len()).map(move |i| &tag[i..])
            })
            .collect();
        suffixes.sort_by(|a, b| b.len().cmp(&a.len()).then(a.cmp(b)));
        suffixes.dedup();
        suffixes.join("|")
    }
}

impl fmt::Display for MarkerField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}
