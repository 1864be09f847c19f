/// Per-department phrase pools: subjects, complaints, locations. Every combination becomes
/// one fixture complaint.
pub const CATEGORY_VOCABULARY: &[(&str, [&[&str]; 3])] = &[
    (
        "Infrastructure",
        [
            &[
                "pothole on road",
                "street lights",
                "bridge support",
                "cracked sidewalk",
                "water pipe leak",
                "traffic signal",
            ],
            &[
                "is crumbling",
                "needs urgent repair",
                "is breaking apart",
                "is dangerous for cars",
                "is gushing water",
            ],
            &[
                "on the main highway",
                "at the intersection",
                "in the downtown area",
                "near the square",
            ],
        ],
    ),
    (
        "Healthcare",
        [
            &[
                "blood pressure",
                "medical emergency",
                "heart rate",
                "insulin stock",
                "ambulance response",
                "clinic hygiene",
            ],
            &[
                "is dangerously low",
                "is dropping fast",
                "needs a doctor immediately",
                "is critical condition",
                "is out of stock",
            ],
            &[
                "at the city hospital",
                "in the medical ward",
                "near the health clinic",
                "at the ER",
            ],
        ],
    ),
    (
        "Sanitation",
        [
            &[
                "trash accumulation",
                "garbage pile",
                "raw sewage",
                "dead animal carcass",
                "illegal dumping",
                "recycling bin",
            ],
            &[
                "is rotting and stinking",
                "is overflowing onto street",
                "is leaking into drains",
                "is attracting rats",
            ],
            &[
                "outside my house",
                "behind the school",
                "near the park",
                "in the residential alley",
            ],
        ],
    ),
    (
        "Administration",
        [
            &[
                "passport processing",
                "birth certificate",
                "tax documents",
                "official website",
                "clerk behavior",
                "permit application",
            ],
            &[
                "is stuck for months",
                "requested a bribe",
                "keeps crashing",
                "is full of errors",
                "is being delayed",
            ],
            &[
                "at town hall",
                "in the records office",
                "on the government portal",
                "at city hall",
            ],
        ],
    ),
    (
        "Public Safety",
        [
            &[
                "violent kidnapping",
                "gang fighting",
                "theft in progress",
                "gunshots fired",
                "suspicious loitering",
                "illegal racing",
            ],
            &[
                "is a threat to life",
                "happened just now",
                "is out of control",
                "reported last night",
                "is extremely scary",
            ],
            &[
                "near Birendra Chowk",
                "at the train station",
                "in the community park",
                "outside the mall",
            ],
        ],
    ),
    (
        "General",
        [
            &[
                "The weather",
                "City gardens",
                "Website layout",
                "The parade",
                "Community festival",
            ],
            &[
                "is very nice",
                "looks beautiful",
                "is helpful",
                "is interesting",
                "is a great event",
            ],
            &["today", "this morning", "in the park", "for everyone"],
        ],
    ),
];

/// Every `PREFIX_INTERVAL`-th complaint is prefixed with one of these.
pub const COMPLAINT_PREFIXES: &[&str] = &["Urgent:", "Attention:", "Report:"];
pub const PREFIX_INTERVAL: usize = 4;

pub const FIXTURE_MODEL_VERSION: &str = "fixture-v1";
