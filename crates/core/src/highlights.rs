use crate::claude::{self, Client};
use crate::config::RunConfig;
use crate::error::Result;
use crate::format::format_segments_for_prompt;
use crate::types::{ClipCandidate, Transcript};

fn build_analysis_prompt(transcript: &Transcript, config: &RunConfig) -> String {
    let segments_text = format_segments_for_prompt(transcript);

    format!(
        r#"You are an expert YouTube Shorts creator and copywriter. Analyze this video transcript and identify the {max_clips} BEST moments to turn into viral YouTube Shorts (15-60 second clips).

TRANSCRIPT:
{segments_text}

CRITERIA FOR GREAT SHORTS:
- Self-contained stories or moments (make sense without context)
- High energy, emotional peaks, or funny moments
- Clear punchlines, revelations, or key insights
- Visual moments that would be compelling
- Duration between {min_duration} and {max_duration} seconds

For each suggested clip, provide:
1. start_time (in seconds, from the timestamps above)
2. end_time (in seconds)
3. title (catchy YouTube title, 5-8 words, capitalize key words)
4. hook (attention-grabbing opening line, 5-10 words, creates curiosity)
5. description (full YouTube Shorts description, 2-3 sentences, include relevant hashtags)
6. thumbnail_text (bold text for thumbnail overlay, 2-4 words, ALL CAPS if impactful)
7. reason (why this moment works as a Short)

EXAMPLES OF GOOD OUTPUTS:
- hook: "Wait until you see what happens next..."
- description: "The most unexpected moment from today's session! This is why you should never assume anything. #Shorts #Viral #Unexpected"
- thumbnail_text: "NO WAY!"

Return your response as a JSON array ONLY (no other text):
[
  {{
    "start_time": 45.2,
    "end_time": 72.1,
    "title": "Epic Fail Moment Caught On Camera",
    "hook": "You won't believe this happened...",
    "description": "The most epic fail you'll see today! Watch what happens when confidence meets reality. This is pure comedy gold! #Shorts #EpicFail #Funny #Viral",
    "thumbnail_text": "EPIC FAIL",
    "reason": "High energy moment with visual payoff and standalone story"
  }}
]"#,
        max_clips = config.max_clips,
        min_duration = config.min_duration,
        max_duration = config.max_duration,
    )
}

/// Ask the model for the best clip candidates.
///
/// Candidates come back in the model's order and are trusted verbatim:
/// start/end times are neither clamped to the requested duration bounds
/// nor checked against the source video length.
pub async fn analyze_highlights(
    client: &Client,
    transcript: &Transcript,
    config: &RunConfig,
) -> Result<Vec<ClipCandidate>> {
    let prompt = build_analysis_prompt(transcript, config);
    let response = client.complete(&prompt).await?;
    claude::decode_array(&response)
}
