//! Built-in ideas shown when the service has never been reachable.

use chrono::{DateTime, Duration, Utc};
use idea_core::Idea;

/// Sample ideas with ages measured back from `now`.
pub fn mock_ideas(now: DateTime<Utc>) -> Vec<Idea> {
    [
        (
            "1",
            "Coffee Shop Finder",
            "A mobile app that helps you find the best local coffee shops based on your taste preferences",
            15,
            Duration::hours(2),
        ),
        (
            "2",
            "Smart Garden System",
            "Smart garden system that automatically waters plants based on weather and soil conditions",
            8,
            Duration::hours(5),
        ),
        (
            "3",
            "VR Meditation Spaces",
            "Virtual reality meditation spaces for stress relief in busy work environments",
            23,
            Duration::days(1),
        ),
    ]
    .into_iter()
    .map(|(id, title, description, upvotes, age)| Idea {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        upvotes,
        created_at: now - age,
        updated_at: now - age,
    })
    .collect()
}
