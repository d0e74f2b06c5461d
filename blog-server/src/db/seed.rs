//! Sample data for a fresh blogging platform database.
//!
//! Posts, follower edges and comments point at users and posts by their
//! position in the sample lists; the ids the database hands back are used to
//! resolve those positions, so seeding works on a table whose id sequence
//! does not start at 1.

use super::{DataManager, DbResult};

/// (username, email, password, bio)
const SAMPLE_USERS: [(&str, &str, &str, &str); 4] = [
    ("mansi", "mansi@example.com", "mansi1234", "happy girl"),
    ("manav", "manav@example.com", "manav1234", "nightmare"),
    ("kailash", "kailash@example.com", "kailash1234", "humour is first priority"),
    ("rashmi", "rashmi@example.com", "rashmi1234", "mum of a pretty girl"),
];

/// (title, content, author index)
const SAMPLE_POSTS: [(&str, &str, usize); 4] = [
    (
        "Blooming Flower",
        "Flowers are the vibrant, colorful, and fragrant reproductive structures of \
         flowering plants. They are nature's way of attracting pollinators, such as bees, \
         butterflies, and birds, ensuring the continuation of plant species through the \
         process of pollination. Beyond their biological purpose, flowers hold a special \
         place in human culture and emotions. They are symbols of beauty, love, and life, \
         often given as gifts to express affection, sympathy, and congratulations. Each \
         type of flower carries its own unique symbolism and aesthetic appeal, making \
         them integral to gardens, celebrations, and rituals around the world. From the \
         delicate petals of a rose to the bright faces of sunflowers, flowers bring joy \
         and serenity, reminding us of the intricate beauty of the natural world.",
        0,
    ),
    (
        "Night Sky",
        "The night sky is a breathtaking canvas of cosmic wonders, captivating viewers \
         with its serene and mysterious beauty. As the sun sets and darkness envelops the \
         earth, the sky transforms into a vast expanse studded with shimmering stars, \
         distant planets, and the gentle glow of the moon. A picture of the night sky can \
         evoke a sense of wonder and tranquility, capturing the delicate twinkle of \
         countless stars that have traveled light-years to reach our eyes. The \
         constellations, with their storied histories, trace patterns that have guided \
         travelers and inspired dreamers for millennia. The deep, velvety blackness is \
         occasionally interrupted by the streak of a meteor or the slow, deliberate march \
         of a satellite. In rural areas, far from city lights, the night sky reveals even \
         more of its secrets, with the Milky Way's hazy band arching gracefully across \
         the heavens. Whether observed through the lens of a camera or the naked eye, the \
         night sky is a profound reminder of the universe's vastness and the enduring \
         beauty of the cosmos.",
        1,
    ),
    (
        "Humorous Moments",
        "A humorous moment captured in a picture, where everyone is in joy, radiates pure \
         delight and camaraderie. The photograph might show a group of friends or family \
         members in the midst of laughter, their faces lit up with smiles and eyes \
         sparkling with mirth. Perhaps someone just told a hilarious joke, or a playful \
         mishap occurred, igniting a wave of contagious laughter. The spontaneous \
         expressions and animated gestures in the image reflect a shared experience of \
         joy and light-heartedness. Such moments are treasures, as they highlight the \
         bonds between people and the simple, yet profound, happiness found in each \
         other's company. Whether it’s the result of a funny story, a witty comment, or \
         an unexpected twist, these humorous moments bring people together, creating \
         memories that are cherished long after the laughter fades.",
        2,
    ),
    (
        "Motherhood",
        "A picture capturing the essence of motherhood reveals a profound bond of love \
         and tenderness between a mother and her child. In this snapshot, the mother's \
         face beams with a radiant smile, her eyes filled with a deep sense of \
         fulfillment and unconditional affection. Cradling her child in her arms or \
         gazing adoringly at them, she exudes a warmth that transcends words. It's a \
         moment where every touch, every glance, conveys a world of emotions—joy, pride, \
         and an overwhelming sense of responsibility. The child, nestled close, embodies \
         trust and security in the embrace of their nurturing guardian. This picture \
         epitomizes the beauty of motherhood, a journey of selfless devotion and endless \
         nurturing, where each moment is a testament to the boundless love that shapes \
         both mother and child.",
        3,
    ),
];

/// (follower index, following index)
const SAMPLE_FOLLOWERS: [(usize, usize); 4] = [(0, 1), (1, 2), (2, 3), (3, 0)];

/// (content, post index, author index)
const SAMPLE_COMMENTS: [(&str, usize, usize); 4] = [
    ("Indeed nature is beautiful and colorful like the flowers!", 0, 0),
    ("Aaahhh sky is my fav! and especially at night.", 1, 1),
    ("Love, Laughter and memories!", 2, 2),
    ("Greatest feeling and joy of all time!", 3, 3),
];

/// Outcome of every insert attempted by [`seed_sample_data`]
#[derive(Debug, Default)]
pub struct SeedReport {
    succeeded: Vec<String>,
    failed: Vec<(String, String)>,
}

impl SeedReport {
    pub fn succeeded(&self) -> &[String] {
        &self.succeeded
    }

    /// Failed inserts as (label, reason)
    pub fn failed(&self) -> &[(String, String)] {
        &self.failed
    }

    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }

    fn track<T>(&mut self, label: String, result: DbResult<T>) -> Option<T> {
        match result {
            Ok(value) => {
                tracing::info!("{} inserted successfully", label);
                self.succeeded.push(label);
                Some(value)
            }
            Err(e) => {
                self.record_failure(label, &e);
                None
            }
        }
    }

    fn record_failure(&mut self, label: String, reason: &dyn std::fmt::Display) {
        tracing::error!("Failed to insert {}: {}", label, reason);
        self.failed.push((label, reason.to_string()));
    }
}

/// Look up the id generated for a sample entry, if its insert succeeded
fn resolve(ids: &[Option<i64>], index: usize) -> Option<i64> {
    ids.get(index).copied().flatten()
}

/// Insert the sample users, posts, follower edges and comments.
///
/// Each insert stands alone; a failure is recorded and seeding moves on.
/// Rows that depend on a failed insert are recorded as failed without
/// touching the database.
pub fn seed_sample_data(data: &DataManager<'_>) -> SeedReport {
    let mut report = SeedReport::default();

    let user_ids: Vec<Option<i64>> = SAMPLE_USERS
        .iter()
        .map(|&(username, email, password, bio)| {
            report.track(
                format!("User {username}"),
                data.insert_user(username, email, password, Some(bio)),
            )
        })
        .collect();

    let post_ids: Vec<Option<i64>> = SAMPLE_POSTS
        .iter()
        .map(|&(title, content, author)| {
            let label = format!("Post '{title}'");
            match resolve(&user_ids, author) {
                Some(author_id) => {
                    report.track(label, data.insert_post(title, content, author_id))
                }
                None => {
                    report.record_failure(label, &"author was not inserted");
                    None
                }
            }
        })
        .collect();

    for &(follower, following) in &SAMPLE_FOLLOWERS {
        match (resolve(&user_ids, follower), resolve(&user_ids, following)) {
            (Some(follower_id), Some(following_id)) => {
                report.track(
                    format!("Follower relationship {follower_id} -> {following_id}"),
                    data.insert_follower(follower_id, following_id),
                );
            }
            _ => report.record_failure(
                format!("Follower relationship #{follower} -> #{following}"),
                &"user was not inserted",
            ),
        }
    }

    for &(content, post, author) in &SAMPLE_COMMENTS {
        let label = format!("Comment '{content}'");
        match (resolve(&post_ids, post), resolve(&user_ids, author)) {
            (Some(post_id), Some(author_id)) => {
                report.track(label, data.insert_comment(content, post_id, author_id));
            }
            _ => report.record_failure(label, &"post or author was not inserted"),
        }
    }

    report
}

/// Number of inserts [`seed_sample_data`] attempts
pub fn sample_insert_count() -> usize {
    SAMPLE_USERS.len() + SAMPLE_POSTS.len() + SAMPLE_FOLLOWERS.len() + SAMPLE_COMMENTS.len()
}
