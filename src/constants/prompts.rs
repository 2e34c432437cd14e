pub const QUIZ_PROMPT: &str = "Create a quiz with {quiz_size} questions based on the following text and give the answer key at the end. For each question, provide the question, its options and the correct answer. If you can, respond only with JSON shaped like {\"questions\": [{\"question\": \"...\", \"options\": [\"...\"], \"answer\": \"...\"}], \"answerKey\": [\"...\"]}.\n\nText: {text}";

pub const NOTES_PROMPT: &str = "Generate concise notes (summarizing the key points from the following text) or (write notes for this topic):\n\n{text}";

pub const TEACH_PROMPT: &str = "Act like a teacher and provide key insights and explain about this topic, including solving methods. Provide the full concept, and if possible, one question as an example:\n\n{text}";

pub const ANALYZE_PROMPT: &str = "Analyze the following text and provide key insights:\n\n{text}";

pub const VIDEO_QUERY_PROMPT: &str = "Summarize this full text into only one line so I can use it for YouTube search (up to 10 words):\n\n{text}";

pub const ADDITIONAL_INPUT_PREFIX: &str = "Additional Input:\n\n";
