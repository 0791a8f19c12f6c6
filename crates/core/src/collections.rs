//! Folding of repeated booking sub-records into document list fields.

use crate::document::{BodyPartDetail, PrisonerAlert, PrisonerAlias};
use nomis::{Alert, Alias, PhysicalMark};

/// Category of a physical mark, as written in the source record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MarkCategory {
    Tattoo,
    Scar,
    Mark,
    Other,
}

impl MarkCategory {
    /// Parse a source category. Matching is exact; anything else is not a known category.
    pub fn from_wire(s: &str) -> Option<Self> {
        match s {
            "Tattoo" => Some(MarkCategory::Tattoo),
            "Scar" => Some(MarkCategory::Scar),
            "Mark" => Some(MarkCategory::Mark),
            "Other" => Some(MarkCategory::Other),
            _ => None,
        }
    }
}

/// Physical marks partitioned into the four document lists.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MarksByCategory {
    pub tattoos: Vec<BodyPartDetail>,
    pub scars: Vec<BodyPartDetail>,
    pub marks: Vec<BodyPartDetail>,
    pub other_marks: Vec<BodyPartDetail>,
}

impl MarksByCategory {
    fn list_mut(&mut self, category: MarkCategory) -> &mut Vec<BodyPartDetail> {
        match category {
            MarkCategory::Tattoo => &mut self.tattoos,
            MarkCategory::Scar => &mut self.scars,
            MarkCategory::Mark => &mut self.marks,
            MarkCategory::Other => &mut self.other_marks,
        }
    }
}

pub fn merge_aliases(aliases: &[Alias]) -> Vec<PrisonerAlias> {
    aliases
        .iter()
        .map(|alias| PrisonerAlias {
            first_name: alias.first_name.clone(),
            middle_names: alias.middle_name.clone(),
            last_name: alias.last_name.clone(),
            date_of_birth: alias.dob,
            gender: alias.gender.clone(),
            ethnicity: alias.ethnicity.clone(),
        })
        .collect()
}

/// Keep only active alerts, in source order.
pub fn merge_active_alerts(alerts: &[Alert]) -> Vec<PrisonerAlert> {
    alerts
        .iter()
        .filter(|alert| alert.active)
        .map(|alert| PrisonerAlert {
            alert_type: alert.alert_type.clone(),
            alert_code: alert.alert_code.clone(),
            active: alert.active,
            expired: alert.expired,
        })
        .collect()
}

/// Partition marks by category.
///
/// Marks without a body part, or with an unrecognised category, are dropped without
/// diagnostics.
pub fn merge_marks(marks: &[PhysicalMark]) -> MarksByCategory {
    marks
        .iter()
        .filter_map(|mark| {
            let category = MarkCategory::from_wire(mark.category.as_deref()?)?;
            let detail = BodyPartDetail {
                body_part: mark.body_part.clone()?,
                comment: mark.comment.clone(),
            };
            Some((category, detail))
        })
        .fold(MarksByCategory::default(), |mut partitioned, (category, detail)| {
            partitioned.list_mut(category).push(detail);
            partitioned
        })
}
