//! Region tagging by entropy

use tracing::{debug, warn};

use super::SectionTree;
use super::entropy::EntropyModel;
use super::section::Section;
use crate::config::Region;
use crate::consts::REGION_ROLL_FLOOR;
use crate::error::GenerationIssue;
use crate::rng::RandomStream;

/// Pick uniformly among the regions covering `entropy`
fn assign(
    section: &mut Section,
    entropy: f32,
    regions: &[Region],
    rng: &mut RandomStream,
) -> Result<(), GenerationIssue> {
    let covering: Vec<usize> = regions
        .iter()
        .enumerate()
        .filter(|(_, r)| r.contains(entropy))
        .map(|(i, _)| i)
        .collect();
    let Some(choice) = rng.pick(covering.len()) else {
        return Err(GenerationIssue::UncoveredEntropy {
            section: section.id,
            entropy,
        });
    };
    let index = covering[choice];
    debug!(section = %section.id, region = %regions[index].name, entropy, "region assigned");
    section.region_index = Some(index);
    Ok(())
}

/// Roll whether an untagged section takes a region now.
///
/// Larger sections are tagged less often, which leaves room for their
/// children to land in a different region.
pub fn roll_region(
    section: &mut Section,
    entropy: f32,
    regions: &[Region],
    rng: &mut RandomStream,
) -> Result<(), GenerationIssue> {
    if regions.is_empty() || section.region_index.is_some() {
        return Ok(());
    }
    let entropy = entropy.clamp(0.0, 1.0);
    if rng.range_f32(REGION_ROLL_FLOOR, 1.0) > 1.0 - entropy {
        return Ok(());
    }
    assign(section, entropy, regions, rng)
}

/// Tag every registered leaf still without a region.
pub fn settle_regions(
    tree: &mut SectionTree,
    model: &EntropyModel,
    regions: &[Region],
    rng: &mut RandomStream,
) -> Vec<GenerationIssue> {
    let mut issues = Vec::new();
    if regions.is_empty() {
        return issues;
    }
    let leaves = tree.rooms().to_vec();
    for id in leaves {
        let section = tree.get_mut(id);
        if section.region_index.is_some() {
            continue;
        }
        let entropy = model.entropy(section.size);
        if let Err(issue) = assign(section, entropy, regions, rng) {
            warn!(%issue, "leaf left without a region");
            issues.push(issue);
        }
    }
    issues
}
