// src/systems/filter.rs - Category filter matching for subfloor entities
use bevy::prelude::*;
use crate::core::*;

/// True when a scanner set to `filter` should reveal an entity carrying `tags`.
pub fn matches_filter(filter: CategoryFilter, tags: SubfloorTags) -> bool {
    match filter {
        CategoryFilter::All => true,
        CategoryFilter::GasPipes => tags.contains(SubfloorTags::PIPE),
        CategoryFilter::CargoPipes => tags.contains(SubfloorTags::DISPOSAL),
        CategoryFilter::AllWires => tags.intersects(SubfloorTags::ANY_CABLE),
        CategoryFilter::Lv => tags.contains(SubfloorTags::CABLE_LV),
        CategoryFilter::Mv => tags.contains(SubfloorTags::CABLE_MV),
        CategoryFilter::Hv => tags.contains(SubfloorTags::CABLE_HV),
    }
}

/// Derives tags from a prototype name for content that was not tagged explicitly.
pub fn classify_subfloor(name: &str, has_pipe_appearance: bool) -> SubfloorTags {
    let mut tags = SubfloorTags::NONE;
    if has_pipe_appearance {
        tags = tags.with(SubfloorTags::PIPE);
    }
    if name.contains("disposal") {
        tags = tags.with(SubfloorTags::DISPOSAL);
    }
    if name.contains("power cable") {
        tags = tags.with(SubfloorTags::CABLE);
    }
    if name.contains("LV power cable") {
        tags = tags.with(SubfloorTags::CABLE_LV);
    }
    if name.contains("MV power cable") {
        tags = tags.with(SubfloorTags::CABLE_MV);
    }
    if name.contains("HV power cable") {
        tags = tags.with(SubfloorTags::CABLE_HV);
    }
    tags
}

/// Tags freshly spawned subfloor entities that came without explicit tags.
pub fn classify_new_subfloor(
    mut new_subfloor: Query<(&Name, Has<PipeAppearance>, &mut SubfloorTags), Added<SubfloorHide>>,
) {
    for (name, has_pipe, mut tags) in new_subfloor.iter_mut() {
        if *tags != SubfloorTags::NONE {
            continue;
        }
        let derived = classify_subfloor(name.as_str(), has_pipe);
        if derived != SubfloorTags::NONE {
            debug!("Tagged '{}' as {:?}", name.as_str(), derived);
            *tags = derived;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_matches_untagged() {
        assert!(matches_filter(CategoryFilter::All, SubfloorTags::NONE));
        for filter in CategoryFilter::ORDER.iter().skip(1) {
            assert!(!matches_filter(*filter, SubfloorTags::NONE), "{filter:?}");
        }
    }

    #[test]
    fn cable_tiers_are_exclusive() {
        let hv = classify_subfloor("HV power cable", false);
        assert!(matches_filter(CategoryFilter::AllWires, hv));
        assert!(matches_filter(CategoryFilter::Hv, hv));
        assert!(!matches_filter(CategoryFilter::Mv, hv));
        assert!(!matches_filter(CategoryFilter::Lv, hv));
        assert!(!matches_filter(CategoryFilter::GasPipes, hv));
    }

    #[test]
    fn untiered_cable_only_matches_all_wires() {
        let cable = classify_subfloor("power cable", false);
        assert!(matches_filter(CategoryFilter::AllWires, cable));
        assert!(!matches_filter(CategoryFilter::Lv, cable));
    }

    #[test]
    fn pipes_and_disposals() {
        let gas = classify_subfloor("gas pipe", true);
        assert!(matches_filter(CategoryFilter::GasPipes, gas));
        assert!(!matches_filter(CategoryFilter::CargoPipes, gas));

        let disposal = classify_subfloor("disposal pipe segment", false);
        assert!(matches_filter(CategoryFilter::CargoPipes, disposal));
        assert!(!matches_filter(CategoryFilter::GasPipes, disposal));
    }
}
