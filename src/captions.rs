//! Static narrative caption copy for the landing panels.

use web_sys as web;

use crate::core::pan::CaptionDescriptor;

pub static SKY_CAPTIONS: &[CaptionDescriptor] = &[
    CaptionDescriptor {
        anchor: 0.22,
        text: "Globally, around 650 commercial aircraft retire each year on average over the past decade. Over the last 35 years, more than 16,000 passenger and cargo planes have been officially retired. More than 30% of Europe’s current aircraft fleet is expected to retire in the next decade due to age and usage factors.",
    },
    CaptionDescriptor {
        anchor: 0.58,
        text: "Aircraft retirement rates are projected to accelerate — at least 11,000 retirements expected globally over the next 10 years. Despite growing demand, delivery delays have slowed fleet renewal; older planes stay in service longer under increased maintenance burdens. Retirements per year vary — 400-900 previously; but with global fleet expansion, surplus capacity is rising.",
    },
];

pub static CITY_CAPTIONS: &[CaptionDescriptor] = &[
    CaptionDescriptor {
        anchor: 0.24,
        text: "In 2023, ~42.3% of California households were cost burdened — spending at least 30% of income on housing. The median monthly homeowner costs rose to $2,035 in 2024, up from $1,960 in 2023 — pushing many families toward the breaking point. A household earning $50,000 can now afford fewer than 9% of homes listed for sale nationally, down from ~10% a year ago.",
    },
    CaptionDescriptor {
        anchor: 0.62,
        text: "A household needs ~$232,400/year just to afford CA’s median home payment under current rates. Nearly 80% of extremely low-income renters in CA pay over 50% of income on housing + utilities. California’s housing affordability is near historic lows—median home price & high interest rates exclude most buyers.ter waitlists double as new builds stall out.",
    },
];

/// City panels are marked with a modifier class; everything else narrates
/// the sky.
pub fn captions_for_panel(panel: &web::Element) -> &'static [CaptionDescriptor] {
    if panel.class_list().contains("panel--city") {
        CITY_CAPTIONS
    } else {
        SKY_CAPTIONS
    }
}
