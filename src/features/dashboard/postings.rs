//! The fixed postings shown on the dashboard. They are display data only and
//! never come from the backend.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PostingStatus {
    InProgress,
    Completed,
    PendingReview,
    Closed,
}

/// Colour family of a status badge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BadgeTone {
    Info,
    Success,
    Warning,
    Danger,
}

impl PostingStatus {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            PostingStatus::InProgress => "In Progress",
            PostingStatus::Completed => "Completed",
            PostingStatus::PendingReview => "Pending Review",
            PostingStatus::Closed => "Closed",
        }
    }

    #[must_use]
    pub fn tone(self) -> BadgeTone {
        match self {
            PostingStatus::InProgress => BadgeTone::Info,
            PostingStatus::Completed => BadgeTone::Success,
            PostingStatus::PendingReview => BadgeTone::Warning,
            PostingStatus::Closed => BadgeTone::Danger,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MockJobPosting {
    pub id: u32,
    pub url: &'static str,
    pub title: &'static str,
    pub location: &'static str,
    pub key_skills: &'static [&'static str],
    pub applicants: u32,
    pub status: PostingStatus,
    pub posted_date: &'static str,
}

pub static MOCK_POSTINGS: [MockJobPosting; 6] = [
    MockJobPosting {
        id: 1,
        url: "https://example.com/job/frontend-developer",
        title: "Senior Frontend Developer",
        location: "New York, NY",
        key_skills: &["React", "TypeScript", "Next.js"],
        applicants: 25,
        status: PostingStatus::InProgress,
        posted_date: "May 20, 2025",
    },
    MockJobPosting {
        id: 2,
        url: "https://example.com/job/backend-engineer",
        title: "Backend Software Engineer",
        location: "San Francisco, CA",
        key_skills: &["Node.js", "Python", "AWS"],
        applicants: 42,
        status: PostingStatus::PendingReview,
        posted_date: "May 15, 2025",
    },
    MockJobPosting {
        id: 3,
        url: "https://example.com/job/product-manager",
        title: "Product Manager - SaaS",
        location: "Remote",
        key_skills: &["Agile", "Roadmapping", "User Research"],
        applicants: 18,
        status: PostingStatus::Completed,
        posted_date: "Apr 10, 2025",
    },
    MockJobPosting {
        id: 4,
        url: "https://example.com/job/data-scientist",
        title: "Data Scientist",
        location: "Austin, TX",
        key_skills: &["Machine Learning", "Python", "SQL"],
        applicants: 33,
        status: PostingStatus::InProgress,
        posted_date: "May 28, 2025",
    },
    MockJobPosting {
        id: 5,
        url: "https://example.com/job/ux-designer",
        title: "UX/UI Designer",
        location: "London, UK",
        key_skills: &["Figma", "User Testing", "Prototyping"],
        applicants: 12,
        status: PostingStatus::Closed,
        posted_date: "Mar 01, 2025",
    },
    MockJobPosting {
        id: 6,
        url: "https://example.com/job/devops-engineer",
        title: "DevOps Engineer",
        location: "Berlin, Germany",
        key_skills: &["Kubernetes", "Docker", "CI/CD"],
        applicants: 29,
        status: PostingStatus::InProgress,
        posted_date: "May 22, 2025",
    },
];

#[must_use]
pub fn find_posting(id: u32) -> Option<&'static MockJobPosting> {
    MOCK_POSTINGS.iter().find(|posting| posting.id == id)
}
