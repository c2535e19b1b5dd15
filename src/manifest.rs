//! The static manifest of card images to process.
//!
//! Order defines processing order. Filenames are unique; a duplicate entry
//! would simply reprocess (and overwrite) the same output.

pub const CUTOUT_TARGETS: &[&str] = &[
    "african_american_bald_male.png",
    "african_american_female_agent.png",
    "asian_female_agent.png",
    "asian_male_agent_headshot.png",
    "caucasian_blonde_female.png",
    "caucasian_blonde_male_agent.png",
    "caucasian_brown-haired_female.png",
    "caucasian_brown-haired_male.png",
    "caucasian_red-haired_female.png",
    "caucasian_redhead_male_agent.png",
    "latina_female_agent.png",
    "latino_male_agent.png",
    "mixed_asian-caucasian_female.png",
    "mixed_asian-caucasian_male.png",
    "mixed_black-caucasian_female.png",
    "mixed_black-caucasian_male.png",
    "mixed_black-latina_female.png",
    "mixed_black-latino_male.png",
    "mixed_latina-asian_female.png",
    "mixed_latino-asian_male.png",
    "Grumpy_cat_angry_pose_63318575.png",
    "Grumpy_cat_arms_crossed_f8e46099.png",
    "Grumpy_cat_facepalm_pose_2fdc5a6a.png",
    "Grumpy_cat_fist_pump_e028a55a.png",
    "Grumpy_cat_neutral_pose_ba4a1b4d.png",
    "Grumpy_cat_pointing_pose_6bbe6ae8.png",
    "Grumpy_cat_sideeye_pose_5e52df88.png",
    "Grumpy_cat_thumbs_up_e77056f4.png",
    "Grumpy_cat_walking_pose_4be44c5b.png",
    "Grumpy_orange_Crypto_Cat_ac1ff7e8.png",
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_manifest_has_expected_entry_count() {
        assert_eq!(CUTOUT_TARGETS.len(), 30);
    }

    #[test]
    fn test_manifest_entries_are_unique() {
        let unique: HashSet<_> = CUTOUT_TARGETS.iter().collect();
        assert_eq!(unique.len(), CUTOUT_TARGETS.len());
    }

    #[test]
    fn test_manifest_entries_are_png_filenames() {
        for name in CUTOUT_TARGETS {
            assert!(name.ends_with(".png"), "not a png filename: {}", name);
            assert!(
                !name.contains('/') && !name.contains('\\'),
                "manifest entry must be a bare filename: {}",
                name
            );
        }
    }
}
