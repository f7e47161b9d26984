//! Post records and the calendar queries run over them.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::civil::to_civil;
use crate::error::Result;
use crate::models::{Granularity, Instant, Window};
use crate::window::window_for;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Platform {
    LinkedIn,
    Twitter,
    Both,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PostType {
    #[serde(rename = "General Thought")]
    GeneralThought,
    #[serde(rename = "App Critique")]
    AppCritique,
    #[serde(rename = "Personal Insight")]
    PersonalInsight,
    #[serde(rename = "Trend Response")]
    TrendResponse,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PostStatus {
    Idea,
    Drafted,
    Scheduled,
    Posted,
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Platform::LinkedIn => write!(f, "LinkedIn"),
            Platform::Twitter => write!(f, "Twitter"),
            Platform::Both => write!(f, "Both"),
        }
    }
}

impl fmt::Display for PostType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PostType::GeneralThought => write!(f, "General Thought"),
            PostType::AppCritique => write!(f, "App Critique"),
            PostType::PersonalInsight => write!(f, "Personal Insight"),
            PostType::TrendResponse => write!(f, "Trend Response"),
        }
    }
}

impl fmt::Display for PostStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PostStatus::Idea => write!(f, "Idea"),
            PostStatus::Drafted => write!(f, "Drafted"),
            PostStatus::Scheduled => write!(f, "Scheduled"),
            PostStatus::Posted => write!(f, "Posted"),
        }
    }
}

/// A scheduled social-media post as the persistence layer hands it over.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    pub title: String,
    pub platform: Vec<Platform>,
    #[serde(default)]
    pub caption: String,
    #[serde(default)]
    pub hashtags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset_url: Option<String>,
    pub scheduled_at: Instant,
    #[serde(rename = "type")]
    pub post_type: PostType,
    pub status: PostStatus,
}

impl Post {
    /// Whether the post goes out on `platform`. `Both` covers LinkedIn and
    /// Twitter.
    pub fn targets(&self, platform: Platform) -> bool {
        self.platform
            .iter()
            .any(|p| *p == platform || *p == Platform::Both)
    }
}

/// Posts scheduled inside `window`, earliest first.
pub fn posts_in_window<'a>(posts: &'a [Post], window: &Window) -> Vec<&'a Post> {
    let mut matching: Vec<&Post> = posts
        .iter()
        .filter(|post| window.contains(post.scheduled_at))
        .collect();
    matching.sort_by_key(|post| post.scheduled_at);
    matching
}

/// Posts inside `window` grouped by IST hour of day (day view rows).
pub fn posts_by_hour<'a>(posts: &'a [Post], window: &Window) -> BTreeMap<u32, Vec<&'a Post>> {
    let mut hours: BTreeMap<u32, Vec<&Post>> = BTreeMap::new();
    for post in posts_in_window(posts, window) {
        hours
            .entry(to_civil(post.scheduled_at).hour())
            .or_default()
            .push(post);
    }
    hours
}

/// Posts inside `window` grouped by IST day key (`YYYY-MM-DD`).
pub fn posts_by_day<'a>(posts: &'a [Post], window: &Window) -> BTreeMap<String, Vec<&'a Post>> {
    let mut days: BTreeMap<String, Vec<&Post>> = BTreeMap::new();
    for post in posts_in_window(posts, window) {
        let key = to_civil(post.scheduled_at)
            .date()
            .format("%Y-%m-%d")
            .to_string();
        days.entry(key).or_default().push(post);
    }
    days
}

/// Counts for one calendar window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WindowStats {
    pub title: String,
    pub window: Window,
    pub total: usize,
    pub posted: usize,
    pub scheduled: usize,
    pub drafted: usize,
    pub ideas: usize,
    pub linkedin: usize,
    pub twitter: usize,
}

impl WindowStats {
    pub fn compute(title: impl Into<String>, posts: &[Post], window: Window) -> Self {
        let inside = posts_in_window(posts, &window);
        let with_status = |status: PostStatus| inside.iter().filter(|p| p.status == status).count();
        let on = |platform: Platform| inside.iter().filter(|p| p.targets(platform)).count();

        WindowStats {
            title: title.into(),
            total: inside.len(),
            posted: with_status(PostStatus::Posted),
            scheduled: with_status(PostStatus::Scheduled),
            drafted: with_status(PostStatus::Drafted),
            ideas: with_status(PostStatus::Idea),
            linkedin: on(Platform::LinkedIn),
            twitter: on(Platform::Twitter),
            window,
        }
    }
}

/// Month, week and day statistics around `now`, in that order.
pub fn calendar_stats(posts: &[Post], now: Instant) -> Result<Vec<WindowStats>> {
    [
        ("This Month", Granularity::Month),
        ("This Week", Granularity::Week),
        ("Today", Granularity::Day),
    ]
    .into_iter()
    .map(|(title, granularity)| {
        window_for(now, granularity).map(|window| WindowStats::compute(title, posts, window))
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(id: &str, at: &str, platform: Vec<Platform>, status: PostStatus) -> Post {
        Post {
            id: id.to_string(),
            title: format!("Post {id}"),
            platform,
            caption: String::new(),
            hashtags: Vec::new(),
            asset_url: None,
            scheduled_at: Instant::parse(at).unwrap(),
            post_type: PostType::GeneralThought,
            status,
        }
    }

    fn sample() -> Vec<Post> {
        vec![
            // 2024-06-15 00:01 IST (Saturday)
            post("late", "2024-06-14T18:31:00Z", vec![Platform::Twitter], PostStatus::Scheduled),
            // 2024-06-14 23:59 IST (Friday)
            post("a", "2024-06-14T18:29:00Z", vec![Platform::LinkedIn], PostStatus::Posted),
            // 2024-06-14 09:30 IST
            post("b", "2024-06-14T04:00:00Z", vec![Platform::Both], PostStatus::Drafted),
            // 2024-06-02 10:00 IST
            post("c", "2024-06-02T04:30:00Z", vec![Platform::LinkedIn], PostStatus::Idea),
            // 2024-05-31 23:00 IST
            post("d", "2024-05-31T17:30:00Z", vec![Platform::Twitter], PostStatus::Posted),
        ]
    }

    fn now() -> Instant {
        // Friday 2024-06-14 12:00 IST
        Instant::parse("2024-06-14T06:30:00Z").unwrap()
    }

    #[test]
    fn post_json_uses_camel_case() {
        let json = r##"{
            "id": "1",
            "title": "Launch",
            "platform": ["LinkedIn", "Twitter"],
            "caption": "Hello",
            "hashtags": ["#rust"],
            "assetUrl": "https://cdn.example.com/a.png",
            "scheduledAt": "2024-06-14T18:29:00.000Z",
            "type": "App Critique",
            "status": "Scheduled"
        }"##;
        let post: Post = serde_json::from_str(json).unwrap();
        assert_eq!(post.post_type, PostType::AppCritique);
        assert_eq!(post.asset_url.as_deref(), Some("https://cdn.example.com/a.png"));
        assert_eq!(post.scheduled_at.to_string(), "2024-06-14T18:29:00.000Z");

        let value = serde_json::to_value(&post).unwrap();
        assert_eq!(value["scheduledAt"], "2024-06-14T18:29:00.000Z");
        assert_eq!(value["type"], "App Critique");
    }

    #[test]
    fn post_with_bad_timestamp_is_rejected() {
        let json = r#"{"id": "1", "title": "t", "platform": [], "scheduledAt": "soon",
                       "type": "Trend Response", "status": "Idea"}"#;
        assert!(serde_json::from_str::<Post>(json).is_err());
    }

    #[test]
    fn display_matches_wire_names() {
        assert_eq!(PostType::PersonalInsight.to_string(), "Personal Insight");
        assert_eq!(
            serde_json::to_string(&PostType::PersonalInsight).unwrap(),
            "\"Personal Insight\""
        );
        assert_eq!(Platform::LinkedIn.to_string(), "LinkedIn");
        assert_eq!(PostStatus::Drafted.to_string(), "Drafted");
    }

    #[test]
    fn both_targets_each_platform() {
        let p = post("x", "2024-06-14T04:00:00Z", vec![Platform::Both], PostStatus::Idea);
        assert!(p.targets(Platform::LinkedIn));
        assert!(p.targets(Platform::Twitter));
    }

    #[test]
    fn day_window_uses_ist_midnight() {
        let posts = sample();
        let today = window_for(now(), Granularity::Day).unwrap();
        let ids: Vec<&str> = posts_in_window(&posts, &today)
            .iter()
            .map(|p| p.id.as_str())
            .collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[test]
    fn group_by_hour() {
        let posts = sample();
        let today = window_for(now(), Granularity::Day).unwrap();
        let hours = posts_by_hour(&posts, &today);
        assert_eq!(hours.keys().copied().collect::<Vec<_>>(), vec![9, 23]);
        assert_eq!(hours[&23][0].id, "a");
    }

    #[test]
    fn group_by_day() {
        let posts = sample();
        let week = window_for(now(), Granularity::Week).unwrap();
        let days = posts_by_day(&posts, &week);
        assert_eq!(
            days.keys().cloned().collect::<Vec<_>>(),
            vec!["2024-06-14".to_string(), "2024-06-15".to_string()]
        );
    }

    #[test]
    fn stats_for_month_week_day() {
        let posts = sample();
        let stats = calendar_stats(&posts, now()).unwrap();
        let titles: Vec<&str> = stats.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["This Month", "This Week", "Today"]);

        let month = &stats[0];
        assert_eq!(month.total, 4);
        assert_eq!(month.posted, 1);
        assert_eq!(month.scheduled, 1);
        assert_eq!(month.drafted, 1);
        assert_eq!(month.ideas, 1);
        assert_eq!(month.linkedin, 3);
        assert_eq!(month.twitter, 2);

        let week = &stats[1];
        assert_eq!(week.total, 3);

        let today = &stats[2];
        assert_eq!(today.total, 2);
        assert_eq!(today.linkedin, 2);
        assert_eq!(today.twitter, 1);
    }
}
