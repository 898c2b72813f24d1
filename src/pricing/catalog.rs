//! Compiled-in service catalog.
//!
//! Pure data: no validation is performed, the catalog is trusted
//! configuration. Discovery and messaging carry the long-standing
//! calculator prices; consulting and visual were added with the
//! per-item sensitivity coefficients.

use super::models::{Category, EstimateState, GlobalFactors, LineItem};

pub const DISCOVERY: &str = "discovery";
pub const CONSULTING: &str = "consulting";
pub const MESSAGING: &str = "messaging";
pub const VISUAL: &str = "visual";

/// Initial session state: all global factors at 0, every category in
/// display order.
pub fn default_state() -> EstimateState {
    EstimateState::new(GlobalFactors::default())
        .with_category(discovery())
        .with_category(consulting())
        .with_category(messaging())
        .with_category(visual())
}

fn discovery() -> Category {
    Category::new(DISCOVERY)
        .with_item("base", LineItem::priced(2500.0).checked(true).subjective(1.0).size(0.25))
        .with_item("localOnSite", LineItem::priced(3000.0).subjective(0.5).size(1.0))
        .with_item("onSite", LineItem::priced(8500.0).multiplier(750.0).subjective(0.5).size(1.0))
        .with_item("survey", LineItem::priced(1000.0).size(0.5))
        .with_item("demographicReports", LineItem::priced(275.0).checked(true))
        .with_item("focusGroups", LineItem::priced(1000.0).subjective(0.5).size(0.5))
        .with_item("brandAudit", LineItem::priced(500.0).subjective(1.0))
        .with_item("webAudit", LineItem::priced(500.0).subjective(0.5))
}

fn consulting() -> Category {
    Category::new(CONSULTING)
        .with_item("base", LineItem::priced(1500.0).checked(true).subjective(1.0).size(0.5))
        .with_item("strategySession", LineItem::priced(1200.0).subjective(1.0).size(0.25))
        .with_item(
            "leadershipRetreat",
            LineItem::priced(4500.0).multiplier(500.0).subjective(1.0).size(1.0),
        )
        .with_item("staffWorkshop", LineItem::priced(900.0).quantity(2).size(1.0))
        .with_item("monthlyCoaching", LineItem::priced(650.0).quantity(3).subjective(0.5))
}

fn messaging() -> Category {
    Category::new(MESSAGING)
        .with_item("base", LineItem::priced(1000.0).checked(true).subjective(1.0).size(0.25))
        .with_item("persona", LineItem::priced(600.0).checked(true).quantity(3).subjective(0.5))
        .with_item("archetype", LineItem::priced(300.0).checked(true).subjective(0.5))
        .with_item("toneWords", LineItem::priced(250.0).checked(true).quantity(2).subjective(0.5))
        .with_item(
            "valuePropositions",
            LineItem::priced(725.0).checked(true).quantity(5).subjective(1.0).size(0.25),
        )
        .with_item("brandPromise", LineItem::priced(350.0).checked(true).subjective(1.0))
        .with_item("coreStory", LineItem::priced(600.0).checked(true).subjective(1.0).size(0.25))
        .with_item("oneLiner", LineItem::priced(350.0).checked(true).subjective(0.5))
}

fn visual() -> Category {
    Category::new(VISUAL)
        .with_item("base", LineItem::priced(2000.0).checked(true).subjective(1.0).size(0.5))
        .with_item("logo", LineItem::priced(3500.0).subjective(1.5).size(0.5))
        .with_item("styleGuide", LineItem::priced(1800.0).subjective(1.0).size(0.5))
        .with_item("stationery", LineItem::priced(450.0).size(0.25))
        .with_item("signage", LineItem::priced(1200.0).quantity(2).multiplier(150.0).size(1.5))
        .with_item("websiteDesign", LineItem::priced(6500.0).subjective(1.0).size(1.0))
        .with_item("socialTemplates", LineItem::priced(400.0).quantity(4).subjective(0.5))
}
