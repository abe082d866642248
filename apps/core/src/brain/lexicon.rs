//! Static lexicons and canned text.
//!
//! Label tables are declared as ordered slices: the declaration order is the
//! scan order used by the analyzer and the followup generator.

/// A category label and the trigger phrases that select it.
///
/// Triggers are matched as lower-case substrings of the lower-cased text,
/// so "hurt" also matches "hurtful".
#[derive(Debug, Clone, Copy)]
pub struct Lexicon {
    pub label: &'static str,
    pub triggers: &'static [&'static str],
}

impl Lexicon {
    /// True when any trigger occurs in `text_lower`.
    pub fn matches(&self, text_lower: &str) -> bool {
        self.triggers.iter().any(|t| text_lower.contains(t))
    }
}

/// Emotion labels. The first eight are the followup candidates, in priority order.
pub const EMOTIONS: &[Lexicon] = &[
    Lexicon {
        label: "anxiety",
        triggers: &[
            "anxious", "anxiety", "worried", "worry", "nervous", "panic", "uneasy", "on edge",
            "overthinking", "dread",
        ],
    },
    Lexicon {
        label: "sadness",
        triggers: &[
            "sad", "unhappy", "depressed", "feeling down", "let down", "crying", "tears",
            "heartbroken", "miserable", "gloomy",
        ],
    },
    Lexicon {
        label: "anger",
        triggers: &[
            "angry", "anger", "furious", "mad at", "rage", "irritated", "annoyed", "resent",
            "pissed",
        ],
    },
    Lexicon {
        label: "stress",
        triggers: &[
            "stressed", "stress", "overwhelmed", "pressure", "burnout", "burned out",
            "too much to do", "swamped",
        ],
    },
    Lexicon {
        label: "loneliness",
        triggers: &[
            "lonely", "alone", "isolated", "left out", "nobody", "no one to talk",
            "disconnected",
        ],
    },
    Lexicon {
        label: "joy",
        triggers: &[
            "happy", "joy", "wonderful", "great day", "delighted", "cheerful", "glad", "amazing",
            "fantastic",
        ],
    },
    Lexicon {
        label: "gratitude",
        triggers: &["grateful", "thankful", "gratitude", "appreciate", "blessed", "thanks"],
    },
    Lexicon {
        label: "hope",
        triggers: &[
            "hope", "hopeful", "looking forward", "optimistic", "better tomorrow",
            "things will get better",
        ],
    },
    Lexicon {
        label: "excitement",
        triggers: &["excited", "exciting", "thrilled", "can't wait", "pumped", "eager"],
    },
    Lexicon {
        label: "pride",
        triggers: &["proud", "pride", "accomplished", "nailed it", "achieved"],
    },
    Lexicon {
        label: "fear",
        triggers: &["afraid", "scared", "fear", "terrified", "frightened"],
    },
    Lexicon {
        label: "frustration",
        triggers: &["frustrated", "frustrating", "stuck", "fed up", "annoying"],
    },
    Lexicon {
        label: "calm",
        triggers: &["calm", "peaceful", "relaxed", "serene", "at ease", "content"],
    },
    Lexicon {
        label: "confusion",
        triggers: &["confused", "unsure", "uncertain", "lost", "don't know what"],
    },
];

pub const THEMES: &[Lexicon] = &[
    Lexicon {
        label: "work",
        triggers: &[
            "work", "job", "boss", "deadline", "office", "career", "meeting", "project",
            "coworker", "colleague", "promotion",
        ],
    },
    Lexicon {
        label: "relationships",
        triggers: &[
            "partner", "boyfriend", "girlfriend", "husband", "wife", "friend", "family",
            "my mom", "my dad", "mother", "father", "relationship", "marriage",
        ],
    },
    Lexicon {
        label: "health",
        triggers: &[
            "health", "sick", "doctor", "pain", "exercise", "workout", "sleep", "illness",
            "hospital", "diet", "headache",
        ],
    },
    Lexicon {
        label: "finance",
        triggers: &[
            "money", "bills", "rent", "debt", "salary", "budget", "afford", "expenses",
            "savings", "loan",
        ],
    },
    Lexicon {
        label: "personal_growth",
        triggers: &[
            "growth", "improve", "better version", "habit", "goal", "self-improvement",
            "progress",
        ],
    },
    Lexicon {
        label: "identity",
        triggers: &["who i am", "identity", "myself", "purpose", "belong", "my values"],
    },
    Lexicon {
        label: "loss",
        triggers: &[
            "loss", "grief", "passed away", "died", "funeral", "miss them", "breakup",
        ],
    },
    Lexicon {
        label: "achievement",
        triggers: &[
            "achieved", "accomplished", "success", "promotion", "i won", "finished", "completed",
            "milestone",
        ],
    },
    Lexicon {
        label: "mental_health",
        triggers: &[
            "therapy", "therapist", "anxiety", "depression", "mental health", "panic attack",
            "medication", "counseling",
        ],
    },
    Lexicon {
        label: "creativity",
        triggers: &[
            "creative", "artwork", "painting", "drawing", "music", "writing", "design", "craft",
        ],
    },
    Lexicon {
        label: "learning",
        triggers: &[
            "learn", "study", "class", "course", "exam", "school", "reading", "lesson",
            "homework",
        ],
    },
];

pub const NEEDS: &[Lexicon] = &[
    Lexicon {
        label: "support",
        triggers: &["need help", "support", "someone to talk", "lean on", "help me"],
    },
    Lexicon {
        label: "understanding",
        triggers: &["understand", "nobody gets", "misunderstood", "listen"],
    },
    Lexicon {
        label: "connection",
        triggers: &["connect", "together", "lonely", "friends", "company", "belong"],
    },
    Lexicon {
        label: "validation",
        triggers: &[
            "validation", "recognized", "appreciated", "noticed", "acknowledge",
            "not good enough",
        ],
    },
    Lexicon {
        label: "action",
        triggers: &["need to", "have to", "should", "plan", "change", "decide", "figure out"],
    },
    Lexicon {
        label: "rest",
        triggers: &[
            "sleep", "rest", "tired", "exhausted", "break", "relax", "vacation", "burnout",
        ],
    },
    Lexicon {
        label: "clarity",
        triggers: &["confused", "unsure", "clarity", "don't know", "unclear", "make sense"],
    },
    Lexicon {
        label: "hope",
        triggers: &["hope", "future", "someday", "looking forward"],
    },
    Lexicon {
        label: "acceptance",
        triggers: &["accept", "let go", "move on", "it is what it is", "forgive"],
    },
    Lexicon {
        label: "growth",
        triggers: &["grow", "improve", "become", "progress", "better person"],
    },
];

/// Curated words used for the emotional word count and the sign-corrected scoring mode.
pub const POSITIVE_WORDS: &[&str] = &[
    "happy", "great", "wonderful", "excellent", "amazing", "awesome", "love", "like", "joy",
    "grateful", "blessed", "calm", "peaceful", "content", "excited", "energetic", "confident",
    "strong", "proud", "successful", "good", "fantastic", "lovely",
];

pub const NEGATIVE_WORDS: &[&str] = &[
    "sad", "unhappy", "depressed", "anxious", "worried", "stressed", "angry", "frustrated",
    "disappointed", "upset", "bad", "terrible", "awful", "horrible", "hate", "dislike", "pain",
    "hurt", "sick", "tired", "exhausted", "scared", "afraid", "lonely", "alone", "lost",
    "confused", "broken",
];

/// Reflection sentences keyed by emotion, in scan order.
///
/// A key of the form `"a|b"` matches when either label is present.
pub const EMOTION_REFLECTIONS: &[(&str, &str)] = &[
    ("anxiety", "It sounds like worry is taking up a lot of space in your mind right now."),
    ("sadness", "There is a real heaviness in what you wrote, and it makes sense to feel it."),
    ("anger", "Something clearly crossed a line for you, and your frustration is valid."),
    ("stress", "You are carrying a lot at once, and that pressure is showing."),
    ("loneliness", "Feeling disconnected from others can be one of the hardest things to sit with."),
    ("joy|excitement", "There is a bright, energetic feeling running through this entry."),
    ("gratitude", "You are noticing the good things around you, and that matters."),
    ("pride", "You have every reason to feel proud of what you did."),
    ("hope", "Even in this moment you are holding onto a sense of what could be."),
];

/// Scanned after the emotions.
pub const THEME_REFLECTIONS: &[(&str, &str)] = &[
    ("work", "Work seems to be shaping a lot of how you feel."),
    ("learning", "You are in the middle of learning something, which takes patience."),
    ("relationships", "The people in your life are clearly on your mind."),
    ("health", "Your body and wellbeing are part of this story too."),
];

/// Scanned last.
pub const NEED_REFLECTIONS: &[(&str, &str)] = &[
    ("support", "It might help to let someone you trust share some of this with you."),
    ("action", "You seem ready to do something about this, even if the first step is small."),
    ("rest", "Your mind and body may be asking for some rest."),
    ("clarity", "You are searching for clarity, and writing it down is a good place to start."),
];

pub const GENERIC_REFLECTION: &str =
    "Thank you for taking the time to put your thoughts into words today.";

/// Followup prompt pools keyed by emotion, in candidate order.
pub const FOLLOWUP_PROMPTS: &[(&str, [&str; 4])] = &[
    (
        "anxiety",
        [
            "What is the specific thing you are most worried might happen?",
            "When you notice the anxiety, where do you feel it in your body?",
            "What is one part of this situation that is within your control?",
            "If a friend felt this way, what would you tell them?",
        ],
    ),
    (
        "sadness",
        [
            "What do you think is at the heart of this sadness?",
            "Is there something or someone you are missing right now?",
            "What has helped you feel even a little lighter in the past?",
            "What would being gentle with yourself look like today?",
        ],
    ),
    (
        "anger",
        [
            "What boundary do you feel was crossed?",
            "What outcome would feel fair to you?",
            "Is there something underneath the anger, like hurt or disappointment?",
            "How would you like to express this in a way that helps you?",
        ],
    ),
    (
        "stress",
        [
            "What is the single biggest source of pressure right now?",
            "Which of your responsibilities could wait or be shared?",
            "When did you last take a real break?",
            "What would make tomorrow feel ten percent easier?",
        ],
    ),
    (
        "loneliness",
        [
            "Who is someone you could reach out to this week?",
            "When did you last feel truly connected to someone?",
            "What kind of connection are you missing most?",
            "Is there a small community or group that shares your interests?",
        ],
    ),
    (
        "joy",
        [
            "What made this moment feel so good?",
            "How can you create more days like this one?",
            "Who would you like to share this feeling with?",
            "What does this tell you about what matters to you?",
        ],
    ),
    (
        "gratitude",
        [
            "What else are you grateful for today?",
            "How could you let someone know you appreciate them?",
            "What small thing brought you unexpected comfort recently?",
            "How does noticing this change the way you see your day?",
        ],
    ),
    (
        "hope",
        [
            "What are you most looking forward to?",
            "What is one step that moves you toward that hope?",
            "Where does this sense of possibility come from?",
            "How can you keep this hope close on harder days?",
        ],
    ),
];

/// Sentiment-bucket prompt pools, from most negative to most positive.
pub const SENTIMENT_PROMPTS: &[(&str, [&str; 3])] = &[
    (
        "very_negative",
        [
            "I notice this entry reflects some difficult emotions. Can you tell me what triggered these feelings?",
            "It sounds like you're going through a challenging time. What would help you feel better right now?",
            "I'm here to listen. Would you like to share more about what's weighing on your mind?",
        ],
    ),
    (
        "negative",
        [
            "I see you're feeling down today. What's the main thing on your mind?",
            "It looks like something is bothering you. Do you want to talk about it?",
            "What happened today that made you feel this way?",
        ],
    ),
    (
        "neutral",
        [
            "How are you feeling about what you just shared?",
            "Is there something positive that happened today you'd like to note?",
            "What would make today better for you?",
        ],
    ),
    (
        "positive",
        [
            "That's wonderful! What made today special?",
            "I'm glad you're feeling good. What contributed to this positive mood?",
            "Keep up the positive energy! What are you grateful for today?",
        ],
    ),
    (
        "very_positive",
        [
            "You seem to be in a great place! What's bringing you this joy?",
            "That's excellent! How can you extend this positive momentum?",
            "This is wonderful to see. What are the key factors creating this happiness?",
        ],
    ),
];

pub const ENCOURAGE_ANXIETY: &str =
    "Take a slow breath. You have handled difficult moments before, and you can handle this one too.";
pub const ENCOURAGE_SADNESS: &str =
    "It's okay to not be okay. Be as kind to yourself today as you would be to someone you love.";
pub const ENCOURAGE_ANGER: &str =
    "Your feelings are valid. Give yourself space before deciding what to do with them.";
pub const ENCOURAGE_LONELINESS: &str =
    "You matter, and reaching out, even in a small way, can make a real difference.";
pub const ENCOURAGE_JOY: &str =
    "Hold onto this feeling. Moments like these are worth remembering.";
pub const ENCOURAGE_GENERIC: &str =
    "Every entry is a step toward understanding yourself better. Keep going.";

/// Insight sentence per dominant emotion; `{theme}` is replaced with a theme clause.
pub const INSIGHT_TEMPLATES: &[(&str, &str)] = &[
    ("anxiety", "Anxiety has been a frequent visitor in your recent entries{theme}. Noticing what sets it off is a powerful first step."),
    ("sadness", "Sadness shows up often in your recent writing{theme}. It may help to give those feelings some gentle attention."),
    ("anger", "Frustration and anger keep surfacing{theme}. They often point to something that matters deeply to you."),
    ("stress", "Stress has been a recurring thread{theme}. Building small moments of rest into your days could help."),
    ("loneliness", "Feelings of loneliness appear repeatedly{theme}. Connection, even in small doses, can ease this."),
    ("joy", "Joy has been a common thread in your entries{theme}. It's worth noticing what brings it."),
    ("gratitude", "Gratitude runs through many of your entries{theme}. That habit of noticing the good is a real strength."),
    ("hope", "Hope keeps appearing in your writing{theme}. You are oriented toward what could be."),
];

/// Terms that flag possible self-harm, matched as substrings of the lower-cased
/// text so inflections ("harmed", "hopelessness", "died") are caught too.
pub const HARM_TERMS: &[&str] = &[
    "hurt", "harm", "suicid", "die", "dying", "hopeless", "kill myself", "end it all",
    "no reason to live",
];

pub const GENERIC_INSIGHT: &str =
    "Your entries show a mix of experiences{theme}. Keep journaling to uncover deeper patterns over time.";
