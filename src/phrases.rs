//! Canned responses
//!
//! Everything here is authored in English; the renderer translates on the
//! way out when the session language differs.

pub const JOKES: &[&str] = &[
    "Why don't scientists trust atoms? Because they make up everything!",
    "I told my computer I needed a break, and it said no problem, it would go to sleep.",
    "Why do programmers prefer dark mode? Because light attracts bugs.",
    "Why did the scarecrow win an award? Because he was outstanding in his field.",
    "There are only 10 kinds of people in the world: those who understand binary and those who don't.",
];

pub const GREETINGS: &[&str] = &[
    "Hello Sir! How can I help you?",
    "Hi there! What can I do for you?",
    "Hello! I'm listening.",
];

pub const FAREWELLS: &[&str] = &[
    "Goodbye Sir! Have a great day!",
    "See you later Sir!",
    "Goodbye! Call me whenever you need me.",
];

pub const NOT_UNDERSTOOD: &[&str] = &[
    "I'm not sure how to help with that. Try saying 'help' to see what I can do.",
    "Sorry, I didn't understand that. Could you say it another way?",
    "I didn't get that. Say 'help' to hear what I can do.",
];

pub const INTRODUCTION: &str = "I am Jarvis Sir. Please tell me how may I help you";

pub const IDENTITY: &str =
    "I am Jarvis, your virtual assistant. I'm here to help you with various tasks!";

pub const HELP: &str = "I can help you with many things. I can search the web, \
    open websites like YouTube and Google, tell you the time and date, check the weather, \
    do simple calculations, play music, open applications, and speak in other languages. \
    Just ask me!";

pub const HOW_ARE_YOU: &str = "I'm doing great, thank you for asking! How can I help you?";

pub const THANKS: &str = "You're welcome Sir!";

pub const WAKE_ACK: &str = "Yes sir?";

pub const RECOGNITION_ERROR: &str = "Sorry, there was an error with the speech recognition service";

pub const SHUTDOWN: &str = "Shutting down. Goodbye!";

pub const FATAL: &str = "Sorry, something went wrong. Shutting down.";

/// Greeting for the given hour of the day (0-23)
#[must_use]
pub const fn time_of_day_greeting(hour: u32) -> &'static str {
    match hour {
        0..=11 => "Good Morning!",
        12..=17 => "Good Afternoon!",
        _ => "Good Evening!",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_of_day_greeting() {
        assert_eq!(time_of_day_greeting(0), "Good Morning!");
        assert_eq!(time_of_day_greeting(11), "Good Morning!");
        assert_eq!(time_of_day_greeting(12), "Good Afternoon!");
        assert_eq!(time_of_day_greeting(17), "Good Afternoon!");
        assert_eq!(time_of_day_greeting(18), "Good Evening!");
        assert_eq!(time_of_day_greeting(23), "Good Evening!");
    }
}
