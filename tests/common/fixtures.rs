use labelgrid::Record;
use serde_json::json;

/// A primary product with every field the kinds read.
pub fn flower(name: &str, brand: &str) -> Record {
    Record::from_value(json!({
        "ProductName": name,
        "ProductBrand": brand,
        "Vendor": "Green Valley",
        "ProductType": "Flower",
        "ProductStrain": "Blue Dream",
        "Lineage": "indica",
        "Description": format!("{name} -"),
        "Weight": "3.50",
        "Units": "g",
        "THC": "22.4",
        "CBD": "0.1",
        "Price": 35,
        "DOH": "Yes"
    }))
}

/// A secondary product: shows its brand where primaries show lineage.
pub fn edible(name: &str, brand: &str) -> Record {
    Record::from_value(json!({
        "ProductName": name,
        "ProductBrand": brand,
        "Vendor": "Kitchen Co",
        "ProductType": "Edible (Solid)",
        "Description": name,
        "Weight": 100,
        "Units": "mg",
        "Ratio": "100mg THC 5mg CBD",
        "Price": "12.5"
    }))
}

/// `count` flowers with distinct names and brands (`Brand-01`, ...).
pub fn flowers(count: usize) -> Vec<Record> {
    (1..=count)
        .map(|i| flower(&format!("Product {i:02}"), &format!("Brand-{i:02}")))
        .collect()
}

/// A single-cell template whose grid carries one extra, hand-edited table.
pub fn template_with_extra_table(extra_table: &str) -> String {
    format!(
        r#"<document>
  <table width="3.3in">
    <grid><col width="3.3in"/></grid>
    <row height="2.4in">
      <cell width="3.3in">
        <p><r><t>{{{{Label1.ProductBrand}}}}</t></r></p>
        <p><r><t>{{{{Label1.Price}}}}</t></r></p>
      </cell>
    </row>
  </table>
  {extra_table}
</document>"#
    )
}
