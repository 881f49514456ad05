//! Age-banded educational tips
//!
//! Static content keyed by a range check on the profile age. Bands follow
//! the product's segmentation: teens (13-19), adults (20-35), mature
//! (36-50), menopause (51+). No age -> no tips; the frontend prompts the
//! user to complete their profile instead.

use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct TipSection {
  pub category: &'static str,
  pub icon: &'static str,
  pub tips: [&'static str; 3],
}

/// Look up the tip sections for an age, or an empty list when the profile
/// has no age (or one below the youngest band).
pub fn tips_for_age(age: Option<i64>) -> Vec<TipSection> {
  let Some(age) = age else {
    return Vec::new();
  };

  if (13..=19).contains(&age) {
    vec![
      TipSection {
        category: "Understanding Your Cycle",
        icon: "📚",
        tips: [
          "Track your period to understand your cycle pattern",
          "Learn about the phases of menstruation",
          "It's normal for cycles to be irregular in the first 2-3 years",
        ],
      },
      TipSection {
        category: "Nutrition & Wellness",
        icon: "🥗",
        tips: [
          "Eat iron-rich foods like leafy greens and lean proteins",
          "Stay hydrated throughout the day",
          "Maintain a balanced diet with whole grains and fruits",
        ],
      },
      TipSection {
        category: "Stress Management",
        icon: "🧘",
        tips: [
          "Practice relaxation techniques like deep breathing",
          "Get 8-10 hours of sleep each night",
          "Stay physically active with activities you enjoy",
        ],
      },
    ]
  } else if (20..=35).contains(&age) {
    vec![
      TipSection {
        category: "Fertility Awareness",
        icon: "🌸",
        tips: [
          "Track ovulation if planning pregnancy",
          "Understand fertile window (typically days 11-21 of cycle)",
          "Consider basal body temperature tracking",
        ],
      },
      TipSection {
        category: "Healthy Habits",
        icon: "💪",
        tips: [
          "Maintain a healthy BMI for regular cycles",
          "Exercise moderately 30 minutes daily",
          "Limit alcohol and caffeine intake",
        ],
      },
      TipSection {
        category: "Cycle Optimization",
        icon: "⚡",
        tips: [
          "Note patterns between stress and cycle irregularities",
          "Eat anti-inflammatory foods like omega-3s",
          "Consider supplements like vitamin D and magnesium",
        ],
      },
    ]
  } else if (36..=50).contains(&age) {
    vec![
      TipSection {
        category: "PCOS Management",
        icon: "🩺",
        tips: [
          "Monitor blood sugar levels regularly",
          "Focus on low-glycemic index foods",
          "Consider inositol supplementation (consult doctor)",
        ],
      },
      TipSection {
        category: "Hormonal Balance",
        icon: "⚖️",
        tips: [
          "Watch for changes in cycle length or flow",
          "Manage stress with yoga or meditation",
          "Support liver health with cruciferous vegetables",
        ],
      },
      TipSection {
        category: "Nutrition Focus",
        icon: "🍎",
        tips: [
          "Increase fiber intake for hormone regulation",
          "Choose organic produce when possible",
          "Limit processed foods and refined sugars",
        ],
      },
    ]
  } else if age >= 51 {
    vec![
      TipSection {
        category: "Managing Symptoms",
        icon: "🌡️",
        tips: [
          "Track hot flashes and night sweats patterns",
          "Dress in layers for temperature changes",
          "Keep bedroom cool for better sleep",
        ],
      },
      TipSection {
        category: "Bone Health",
        icon: "🦴",
        tips: [
          "Increase calcium intake (1200mg daily)",
          "Get adequate vitamin D through sunlight or supplements",
          "Weight-bearing exercises strengthen bones",
        ],
      },
      TipSection {
        category: "Regular Checkups",
        icon: "🩹",
        tips: [
          "Annual gynecological exams are essential",
          "Monitor bone density every 1-2 years",
          "Discuss HRT options with your doctor if needed",
        ],
      },
    ]
  } else {
    Vec::new()
  }
}
