//! Deterministic question generator backed by fixed fact tables.
//!
//! This is the terminal fallback of the generated topic family: each table
//! holds at least [`QUIZ_LENGTH`] entities and every template has at least
//! three distractors that differ from any correct value, so it always yields
//! a full quiz.

use quiz_core::model::{GeneratedTopic, QUIZ_LENGTH, Question, RawQuestion};
use quiz_core::{normalize, shuffle, shuffled};
use rand::Rng;

const DISTRACTORS: usize = 3;

struct MovieFact {
    movie: &'static str,
    year: u16,
    director: &'static str,
    actor: &'static str,
}

struct SongFact {
    singer: &'static str,
    title: &'static str,
    song: &'static str,
    movie: &'static str,
}

const MOVIES: &[MovieFact] = &[
    MovieFact { movie: "Sholay", year: 1975, director: "Ramesh Sippy", actor: "Amitabh Bachchan" },
    MovieFact { movie: "Dilwale Dulhania Le Jayenge", year: 1995, director: "Aditya Chopra", actor: "Shah Rukh Khan" },
    MovieFact { movie: "3 Idiots", year: 2009, director: "Rajkumar Hirani", actor: "Aamir Khan" },
    MovieFact { movie: "Mughal-E-Azam", year: 1960, director: "K. Asif", actor: "Dilip Kumar" },
    MovieFact { movie: "Lagaan", year: 2001, director: "Ashutosh Gowariker", actor: "Aamir Khan" },
    MovieFact { movie: "Zanjeer", year: 1973, director: "Prakash Mehra", actor: "Amitabh Bachchan" },
    MovieFact { movie: "Kuch Kuch Hota Hai", year: 1998, director: "Karan Johar", actor: "Shah Rukh Khan" },
    MovieFact { movie: "Dangal", year: 2016, director: "Nitesh Tiwari", actor: "Aamir Khan" },
    MovieFact { movie: "Taare Zameen Par", year: 2007, director: "Aamir Khan", actor: "Aamir Khan" },
    MovieFact { movie: "Queen", year: 2013, director: "Vikas Bahl", actor: "Kangana Ranaut" },
];

const SONGS: &[SongFact] = &[
    SongFact { singer: "Lata Mangeshkar", title: "Nightingale of India", song: "Lag Jaa Gale", movie: "Woh Kaun Thi" },
    SongFact { singer: "Mohammed Rafi", title: "King of Playback Singing", song: "Chaudhvin Ka Chand", movie: "Chaudhvin Ka Chand" },
    SongFact { singer: "Kishore Kumar", title: "Versatile Singer", song: "Roop Tera Mastana", movie: "Aradhana" },
    SongFact { singer: "A.R. Rahman", title: "Mozart of Madras", song: "Jai Ho", movie: "Slumdog Millionaire" },
    SongFact { singer: "R.D. Burman", title: "Pancham Da", song: "Chura Liya Hai", movie: "Yaadon Ki Baaraat" },
    SongFact { singer: "Asha Bhosle", title: "Queen of Playback", song: "Dum Maro Dum", movie: "Hare Rama Hare Krishna" },
    SongFact { singer: "Kumar Sanu", title: "King of 90s", song: "Tujhe Dekha To", movie: "DDLJ" },
    SongFact { singer: "Udit Narayan", title: "Melodious Voice", song: "Papa Kehte Hain", movie: "Qayamat Se Qayamat Tak" },
    SongFact { singer: "Alka Yagnik", title: "Sweet Voice", song: "Taal Se Taal", movie: "Taal" },
    SongFact { singer: "Sonu Nigam", title: "Modern Legend", song: "Kal Ho Naa Ho", movie: "Kal Ho Naa Ho" },
];

/// Question text, correct value and distractor pool for one entity.
struct Template {
    question: String,
    correct: String,
    others: Vec<String>,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

fn movie_template(fact: &MovieFact, slot: usize) -> Template {
    match slot % 3 {
        0 => Template {
            question: format!("Who directed the movie \"{}\"?", fact.movie),
            correct: fact.director.to_string(),
            others: strings(&["Yash Chopra", "Sanjay Leela Bhansali", "Rohit Shetty", "Imtiaz Ali"]),
        },
        1 => Template {
            question: format!("In which year was \"{}\" released?", fact.movie),
            correct: fact.year.to_string(),
            others: [fact.year - 1, fact.year + 1, fact.year + 2]
                .iter()
                .map(u16::to_string)
                .collect(),
        },
        _ => Template {
            question: format!("Who played the lead role in \"{}\"?", fact.movie),
            correct: fact.actor.to_string(),
            others: strings(&["Salman Khan", "Hrithik Roshan", "Akshay Kumar", "Ranbir Kapoor"]),
        },
    }
}

fn song_template(fact: &SongFact, slot: usize) -> Template {
    match slot % 3 {
        0 => Template {
            question: format!("Who is known as the \"{}\"?", fact.title),
            correct: fact.singer.to_string(),
            others: strings(&["Shreya Ghoshal", "Sunidhi Chauhan", "Arijit Singh", "Rahat Fateh Ali Khan"]),
        },
        1 => Template {
            question: format!("Who sang the song \"{}\"?", fact.song),
            correct: fact.singer.to_string(),
            others: strings(&["Manna Dey", "Mukesh", "Hemant Kumar", "Talat Mahmood"]),
        },
        _ => Template {
            question: format!("The song \"{}\" is from which movie?", fact.song),
            correct: fact.movie.to_string(),
            others: strings(&["Kabhi Kabhie", "Silsila", "Aandhi", "Amar Prem"]),
        },
    }
}

impl Template {
    /// Keep distinct distractors that differ from the answer, shuffle them,
    /// and take the first three.
    fn into_raw<R: Rng + ?Sized>(self, rng: &mut R) -> RawQuestion {
        let mut pool: Vec<String> = Vec::with_capacity(self.others.len());
        for other in self.others {
            if other != self.correct && !pool.contains(&other) {
                pool.push(other);
            }
        }
        shuffle(&mut pool, rng);
        pool.truncate(DISTRACTORS);
        RawQuestion {
            question: self.question,
            options: pool,
            correct: self.correct,
        }
    }
}

/// Build a full quiz for `topic` from the fact tables.
///
/// Entity order is shuffled; entity `i` in that order uses template
/// `i % 3`.
#[must_use]
pub fn generate<R: Rng + ?Sized>(topic: GeneratedTopic, rng: &mut R) -> Vec<Question> {
    let templates: Vec<Template> = match topic {
        GeneratedTopic::BollywoodMovies => {
            let facts = shuffled(MOVIES.iter().collect::<Vec<_>>(), rng);
            facts
                .into_iter()
                .enumerate()
                .map(|(slot, fact)| movie_template(fact, slot))
                .collect()
        }
        GeneratedTopic::BollywoodMusic => {
            let facts = shuffled(SONGS.iter().collect::<Vec<_>>(), rng);
            facts
                .into_iter()
                .enumerate()
                .map(|(slot, fact)| song_template(fact, slot))
                .collect()
        }
    };

    templates
        .into_iter()
        .take(QUIZ_LENGTH)
        .filter_map(|template| normalize(&template.into_raw(rng), rng).ok())
        .collect()
}
