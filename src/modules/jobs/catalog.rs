use itertools::Itertools;
use lazy_static::lazy_static;

/// A listing in the built-in job catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobListing {
    pub id: u32,
    pub title: &'static str,
    pub company: &'static str,
    pub location: &'static str,
    pub salary: &'static str,
    pub job_type: &'static str,
    pub posted: &'static str,
    pub description: &'static str,
    pub skills: &'static [&'static str],
}

lazy_static! {
    /// The catalog of open positions. Static for now; a real deployment
    /// would source these from a feed.
    pub static ref JOB_CATALOG: Vec<JobListing> = vec![
        JobListing {
            id: 1,
            title: "Senior Frontend Developer",
            company: "TechVision Inc",
            location: "San Francisco, CA",
            salary: "$120k - $180k",
            job_type: "Full time",
            posted: "2 days ago",
            description: "Join our elite team to build next-generation user experiences with cutting-edge technologies.",
            skills: &["React", "TypeScript", "GraphQL", "Next.js"],
        },
        JobListing {
            id: 2,
            title: "Product Marketing Lead",
            company: "InnovateLabs",
            location: "Remote",
            salary: "$90k - $140k",
            job_type: "Full time",
            posted: "1 day ago",
            description: "Drive product strategy and growth for revolutionary B2B SaaS solutions.",
            skills: &["Strategy", "Analytics", "Growth", "Leadership"],
        },
        JobListing {
            id: 3,
            title: "AI Research Intern",
            company: "DeepMind Labs",
            location: "London, UK",
            salary: "$8k/month",
            job_type: "Internship",
            posted: "3 days ago",
            description: "Contribute to groundbreaking research in artificial intelligence and machine learning.",
            skills: &["Python", "TensorFlow", "Research", "Mathematics"],
        },
    ];
}

/// Look up a listing by id.
pub fn find_job(id: u32) -> Option<&'static JobListing> {
    JOB_CATALOG.iter().find(|job| job.id == id)
}

/// Case-insensitive substring search across title, company, description, and
/// skills. An empty query matches everything. Results are ordered by id.
pub fn search_jobs(query: &str) -> Vec<&'static JobListing> {
    let query = query.to_lowercase();
    let query = query.trim();

    JOB_CATALOG
        .iter()
        .filter(|job| {
            if query.is_empty() {
                return true;
            }
            job.title.to_lowercase().contains(query)
                || job.company.to_lowercase().contains(query)
                || job.description.to_lowercase().contains(query)
                || job
                    .skills
                    .iter()
                    .any(|skill| skill.to_lowercase().contains(query))
        })
        .sorted_by_key(|job| job.id)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_job() {
        let job = find_job(1).unwrap();
        assert_eq!(job.title, "Senior Frontend Developer");
        assert_eq!(job.company, "TechVision Inc");
        assert!(find_job(99).is_none());
    }

    #[test]
    fn test_search_matches_title_company_skills_description() {
        // Title substring
        let results = search_jobs("frontend");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, 1);

        // Company substring
        let results = search_jobs("innovatelabs");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, 2);

        // Skill substring
        let results = search_jobs("python");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, 3);

        // Description substring
        let results = search_jobs("research");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, 3);
    }

    #[test]
    fn test_search_empty_query_returns_all() {
        let results = search_jobs("");
        assert_eq!(results.len(), JOB_CATALOG.len());

        let results = search_jobs("   ");
        assert_eq!(results.len(), JOB_CATALOG.len());
    }

    #[test]
    fn test_search_no_matches() {
        assert!(search_jobs("blacksmith").is_empty());
    }
}
