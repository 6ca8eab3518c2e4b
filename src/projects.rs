use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub slug: String,
    pub title: String,
    pub summary: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub url: Option<String>,
    /// Featured projects are shown on the home page before any others.
    #[serde(default)]
    pub featured: bool,
    /// Whether `/work/<slug>` has a case study for this project.
    #[serde(default)]
    pub case_study: bool,
}

/// Picks up to `count` distinct projects at random, skipping the one whose slug
/// is `exclude`.
///
/// Only the first `count` slots of the candidate list are shuffled
/// (Fisher-Yates stopped early), so the cost is proportional to `count` rather
/// than to the number of projects.
pub fn get_random_projects<R: Rng + ?Sized>(
    projects: &[Project],
    count: usize,
    exclude: Option<&str>,
    rng: &mut R,
) -> Vec<Project> {
    let mut candidates = projects
        .iter()
        .filter(|p| Some(p.slug.as_str()) != exclude)
        .collect::<Vec<_>>();
    let take = count.min(candidates.len());

    for i in 0..take {
        let j = rng.gen_range(i..candidates.len());
        candidates.swap(i, j);
    }

    candidates.into_iter().take(take).cloned().collect()
}

/// Picks up to `count` projects, featured ones first in random order, then
/// filling any remaining slots with randomly chosen other projects.
pub fn get_featured_projects<R: Rng + ?Sized>(
    projects: &[Project],
    count: usize,
    rng: &mut R,
) -> Vec<Project> {
    let (featured, rest): (Vec<_>, Vec<_>) =
        projects.iter().cloned().partition(|p| p.featured);
    let mut picked = get_random_projects(&featured, count, None, rng);
    let remaining = count - picked.len();
    picked.extend(get_random_projects(&rest, remaining, None, rng));
    picked
}

#[cfg(feature = "ssr")]
fn load_catalog() -> Vec<Project> {
    crate::content::load_projects().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "couldn't load projects");
        Vec::new()
    })
}

#[cfg(feature = "ssr")]
pub fn featured_projects(count: usize) -> Vec<Project> {
    get_featured_projects(&load_catalog(), count, &mut rand::thread_rng())
}

#[cfg(feature = "ssr")]
pub fn random_projects(count: usize, exclude: Option<&str>) -> Vec<Project> {
    get_random_projects(&load_catalog(), count, exclude, &mut rand::thread_rng())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};
    use std::collections::HashSet;

    fn catalog(n: usize) -> Vec<Project> {
        (0..n)
            .map(|i| Project {
                slug: format!("project-{i}"),
                title: format!("Project {i}"),
                summary: String::new(),
                tags: vec![],
                url: None,
                featured: false,
                case_study: false,
            })
            .collect()
    }

    #[test]
    fn test_returns_requested_count_without_duplicates() {
        let projects = catalog(10);
        let mut rng = StdRng::seed_from_u64(7);
        let picked = get_random_projects(&projects, 4, None, &mut rng);
        assert_eq!(picked.len(), 4);
        let slugs = picked.iter().map(|p| p.slug.as_str()).collect::<HashSet<_>>();
        assert_eq!(slugs.len(), 4);
    }

    #[test]
    fn test_count_larger_than_catalog() {
        let projects = catalog(3);
        let mut rng = StdRng::seed_from_u64(1);
        let picked = get_random_projects(&projects, 10, None, &mut rng);
        assert_eq!(picked.len(), 3);
        for p in &projects {
            assert!(picked.contains(p));
        }
    }

    #[test]
    fn test_excluded_slug_never_returned() {
        let projects = catalog(5);
        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let picked = get_random_projects(&projects, 4, Some("project-2"), &mut rng);
            assert_eq!(picked.len(), 4);
            assert!(picked.iter().all(|p| p.slug != "project-2"));
        }
    }

    #[test]
    fn test_empty_inputs() {
        let mut rng = StdRng::seed_from_u64(3);
        assert!(get_random_projects(&[], 3, None, &mut rng).is_empty());
        assert!(get_random_projects(&catalog(4), 0, None, &mut rng).is_empty());
        let only = catalog(1);
        assert!(get_random_projects(&only, 2, Some("project-0"), &mut rng).is_empty());
    }

    #[test]
    fn test_same_seed_same_selection() {
        let projects = catalog(20);
        let a = get_random_projects(&projects, 5, None, &mut StdRng::seed_from_u64(42));
        let b = get_random_projects(&projects, 5, None, &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn test_every_project_can_be_picked() {
        let projects = catalog(6);
        let mut seen = HashSet::new();
        let mut rng = StdRng::seed_from_u64(99);
        for _ in 0..200 {
            for p in get_random_projects(&projects, 1, None, &mut rng) {
                seen.insert(p.slug);
            }
        }
        assert_eq!(seen.len(), 6);
    }

    #[test]
    fn test_input_not_mutated() {
        let projects = catalog(8);
        let before = projects.clone();
        let _ = get_random_projects(&projects, 8, None, &mut StdRng::seed_from_u64(5));
        assert_eq!(projects, before);
    }

    fn with_featured(n: usize, featured: &[usize]) -> Vec<Project> {
        let mut projects = catalog(n);
        for &i in featured {
            projects[i].featured = true;
        }
        projects
    }

    #[test]
    fn test_featured_projects_come_first() {
        let projects = with_featured(8, &[2, 5]);
        for seed in 0..50 {
            let picked = get_featured_projects(&projects, 3, &mut StdRng::seed_from_u64(seed));
            assert_eq!(picked.len(), 3);
            assert!(picked[0].featured && picked[1].featured);
            assert!(!picked[2].featured);
            let slugs = picked.iter().map(|p| p.slug.as_str()).collect::<HashSet<_>>();
            assert_eq!(slugs.len(), 3);
        }
    }

    #[test]
    fn test_more_featured_than_slots() {
        let projects = with_featured(6, &[0, 1, 3, 4]);
        let mut seen = HashSet::new();
        for seed in 0..100 {
            let picked = get_featured_projects(&projects, 2, &mut StdRng::seed_from_u64(seed));
            assert_eq!(picked.len(), 2);
            assert!(picked.iter().all(|p| p.featured));
            seen.extend(picked.into_iter().map(|p| p.slug));
        }
        assert_eq!(seen.len(), 4);
    }

    #[test]
    fn test_no_featured_falls_back_to_random() {
        let projects = catalog(5);
        let picked = get_featured_projects(&projects, 3, &mut StdRng::seed_from_u64(11));
        assert_eq!(picked.len(), 3);
        let picked = get_featured_projects(&projects, 9, &mut StdRng::seed_from_u64(11));
        assert_eq!(picked.len(), 5);
        assert!(get_featured_projects(&[], 3, &mut StdRng::seed_from_u64(11)).is_empty());
    }

    #[test]
    fn test_home_page_selection_uses_featured_content() {
        let projects = crate::content::load_projects().unwrap();
        let featured = projects.iter().filter(|p| p.featured).count();
        assert!(featured > 0);
        let picked = get_featured_projects(&projects, 3, &mut StdRng::seed_from_u64(0));
        assert!(picked.iter().take(featured.min(3)).all(|p| p.featured));
    }
}
