use fomake_model::PageMaster;
use fomake_types::EdgeInsets;

/// Computes the margin box of the body area for a page master.
///
/// The header sits inside the top margin, so the top margin is the header's
/// extent alone. The bottom margin reserves the page margin, the footer's
/// extent and the gap above the footer.
pub fn calculate_margins(master: &PageMaster) -> EdgeInsets {
    let page = master.page_margin;
    let body = master.body.margins;

    let top = match &master.header {
        Some(header) if header.height != 0.0 => header.height,
        _ => 0.0,
    };
    let bottom = match &master.footer {
        Some(footer) if footer.height != 0.0 => page.bottom + footer.height + footer.margins.top,
        _ => page.bottom,
    };

    EdgeInsets::new(page.left + body.left, top, page.right + body.right, bottom)
}

/// Stores the calculated margins on the master.
pub fn apply_calculated_margins(master: &mut PageMaster) {
    master.calculated_page_margins = Some(calculate_margins(master));
}
