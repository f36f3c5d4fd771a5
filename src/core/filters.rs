use crate::models::JobPosting;

/// Check if a posting may be shown to seekers at all
///
/// Callers normally fetch only active, non-disabled postings. The recommender
/// applies this check only when asked to; by default it scores whatever it is
/// given.
#[inline]
pub fn is_recommendable(job: &JobPosting) -> bool {
    job.is_active() && !job.admin_disabled()
}
