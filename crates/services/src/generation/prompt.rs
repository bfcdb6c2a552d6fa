use quiz_core::model::{GeneratedTopic, QUIZ_LENGTH};

const FORMAT_RULE: &str = "Format: Return ONLY a JSON array with objects containing: \
question, choices (array of 4 options), answer";

/// Prompt asking a text model for one quiz worth of questions on `topic`.
#[must_use]
pub fn prompt_for(topic: GeneratedTopic) -> String {
    let focus = match topic {
        GeneratedTopic::BollywoodMovies => {
            "Bollywood movies. Include questions about:\n\
             - Famous actors like Shah Rukh Khan, Amitabh Bachchan, Aamir Khan, Salman Khan\n\
             - Classic movies like Sholay, DDLJ, 3 Idiots, Mughal-E-Azam\n\
             - Directors like Yash Chopra, Rajkumar Hirani, Sanjay Leela Bhansali\n\
             - Famous dialogues and songs"
        }
        GeneratedTopic::BollywoodMusic => {
            "Bollywood music. Include questions about:\n\
             - Legendary singers like Lata Mangeshkar, Mohammed Rafi, Kishore Kumar\n\
             - Music directors like A.R. Rahman, R.D. Burman, Shankar-Jaikishan\n\
             - Famous songs from movies like DDLJ, Aashiqui, Lagaan\n\
             - Playback singers and composers"
        }
    };

    format!("Create exactly {QUIZ_LENGTH} multiple choice quiz questions about {focus}\n{FORMAT_RULE}")
}
