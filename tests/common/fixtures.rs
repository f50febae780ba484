//! Builders for small formatting-object documents.

pub const FO_NS: &str = "http://www.w3.org/1999/XSL/Format";

/// A complete document from a layout-master-set body and page sequences.
pub fn document(masters: &str, sequences: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<fo:root xmlns:fo="{}">
  <fo:layout-master-set>{}</fo:layout-master-set>
  {}
</fo:root>"#,
        FO_NS, masters, sequences
    )
}

/// An A4 master with the given margin shorthand and no static regions.
pub fn plain_master(name: &str, margin: &str) -> String {
    format!(
        r#"<fo:simple-page-master master-name="{}" page-width="210mm" page-height="297mm" margin="{}">
             <fo:region-body/>
           </fo:simple-page-master>"#,
        name, margin
    )
}

/// A master with header and footer regions.
pub fn master_with_regions(name: &str, header: &str, footer: &str) -> String {
    format!(
        r#"<fo:simple-page-master master-name="{name}" page-width="210mm" page-height="297mm" margin="18pt">
             <fo:region-body margin-left="18pt" margin-right="18pt"/>
             <fo:region-before region-name="{header}" extent="72pt"/>
             <fo:region-after region-name="{footer}" extent="28.35pt" margin-top="34.02pt"/>
           </fo:simple-page-master>"#
    )
}

/// A page sequence whose body flow holds `body`.
pub fn page_sequence(master: &str, body: &str) -> String {
    page_sequence_with_static(master, &[], body)
}

pub fn page_sequence_with_static(master: &str, statics: &[(&str, &str)], body: &str) -> String {
    let statics: String = statics
        .iter()
        .map(|(flow, content)| format!(r#"<fo:static-content flow-name="{}">{}</fo:static-content>"#, flow, content))
        .collect();
    format!(
        r#"<fo:page-sequence master-reference="{}">{}<fo:flow flow-name="xsl-region-body">{}</fo:flow></fo:page-sequence>"#,
        master, statics, body
    )
}

/// A one-sequence document on a plain master.
pub fn body_document(body: &str) -> String {
    document(&plain_master("page", "1cm"), &page_sequence("page", body))
}

pub fn block(attrs: &str, content: &str) -> String {
    format!("<fo:block {}>{}</fo:block>", attrs, content)
}

pub fn inline(attrs: &str, content: &str) -> String {
    format!("<fo:inline {}>{}</fo:inline>", attrs, content)
}

/// A list whose items are `(label, body)` pairs.
pub fn list(items: &[(&str, &str)]) -> String {
    let items: String = items
        .iter()
        .map(|(label, body)| {
            format!(
                r#"<fo:list-item>
                     <fo:list-item-label><fo:block>{}</fo:block></fo:list-item-label>
                     <fo:list-item-body><fo:block>{}</fo:block></fo:list-item-body>
                   </fo:list-item>"#,
                label, body
            )
        })
        .collect();
    format!("<fo:list-block>{}</fo:list-block>", items)
}

pub fn table_cell(attrs: &str, content: &str) -> String {
    format!("<fo:table-cell {}><fo:block>{}</fo:block></fo:table-cell>", attrs, content)
}

pub fn table_row(cells: &[String]) -> String {
    format!("<fo:table-row>{}</fo:table-row>", cells.concat())
}

/// A table with the given column widths, optional header row and body rows.
pub fn table(attrs: &str, widths: &[&str], header: Option<String>, rows: &[String]) -> String {
    let columns: String = widths
        .iter()
        .map(|w| format!(r#"<fo:table-column column-width="{}"/>"#, w))
        .collect();
    let header = header
        .map(|row| format!("<fo:table-header>{}</fo:table-header>", row))
        .unwrap_or_default();
    format!(
        "<fo:table {}>{}{}<fo:table-body>{}</fo:table-body></fo:table>",
        attrs,
        columns,
        header,
        rows.concat()
    )
}
