use crate::claude::{self, Client};
use crate::error::Result;
use crate::format::format_transcript_duration;
use crate::types::{Transcript, VideoMetadata};

fn build_metadata_prompt(transcript: &Transcript, video_name: &str) -> String {
    let duration_str = format_transcript_duration(transcript);

    format!(
        r#"You are an expert YouTube SEO specialist and content strategist. Analyze this complete video transcript and create professional YouTube metadata that will maximize views and engagement.

VIDEO INFORMATION:
- File name: {video_name}
- Duration: {duration_str}

FULL TRANSCRIPT:
{full_text}

Based on this content, generate comprehensive YouTube metadata:

1. **title**: Professional YouTube title (50-70 characters, engaging, SEO-optimized, capitalize appropriately)
   - Include key themes or emotions
   - Make it clickable but not clickbait
   - Consider adding year or key descriptor if relevant

2. **description**: Full YouTube video description (3-5 paragraphs)
   - First 2-3 sentences are critical (appears in search)
   - Summarize what viewers will get from watching
   - Include relevant keywords naturally
   - Add 10-15 relevant hashtags at the end
   - Professional and engaging tone

3. **tags**: 15-20 relevant YouTube tags (comma-separated)
   - Mix of broad and specific tags
   - Include genre, mood, style, themes
   - Consider search intent

4. **thumbnail_text**: Bold text for video thumbnail (2-5 words)
   - ALL CAPS if impactful
   - Captures the essence of the video
   - Creates curiosity

5. **category**: Best YouTube category for this content
   - Options: Music, Entertainment, Education, People & Blogs, Film & Animation, Gaming, News & Politics, Howto & Style, Science & Technology, Nonprofits & Activism, Sports, Comedy

6. **key_moments**: 3-5 key moments/chapters with timestamps (format: MM:SS - description)

EXAMPLES OF GOOD OUTPUT:
- title: "Lost in the City - Official Music Video | Emotional Pop Ballad 2025"
- description: "Experience the journey of finding yourself in 'Lost in the City'... [detailed description] #MusicVideo #Pop #EmotionalSong"
- tags: "music video, pop music, emotional song, 2025 music, new music, indie pop"
- thumbnail_text: "LOST IN THE CITY"
- category: "Music"

Return your response as JSON ONLY (no other text):
{{
  "title": "Professional Title Here",
  "description": "Full description with multiple paragraphs and hashtags...",
  "tags": ["tag1", "tag2", "tag3", ...],
  "thumbnail_text": "THUMBNAIL TEXT",
  "category": "Music",
  "key_moments": [
    {{"timestamp": "0:00", "description": "Intro/Hook"}},
    {{"timestamp": "1:15", "description": "First Verse"}},
    {{"timestamp": "2:30", "description": "Chorus Drop"}}
  ]
}}"#,
        full_text = transcript.text,
    )
}

/// Ask the model for full-video YouTube metadata.
///
/// A malformed JSON reply propagates as a parse error.
pub async fn generate_video_metadata(
    client: &Client,
    transcript: &Transcript,
    video_name: &str,
) -> Result<VideoMetadata> {
    let prompt = build_metadata_prompt(transcript, video_name);
    let response = client.complete(&prompt).await?;
    claude::decode_object(&response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Segment;

    #[test]
    fn prompt_embeds_name_duration_and_transcript() {
        let transcript = Transcript {
            text: "full transcript body".to_string(),
            segments: vec![Segment {
                start: 0.0,
                end: 125.0,
                text: "full transcript body".to_string(),
            }],
        };

        let prompt = build_metadata_prompt(&transcript, "demo");
        assert!(prompt.contains("File name: demo"));
        assert!(prompt.contains("Duration: 2:05"));
        assert!(prompt.contains("full transcript body"));
    }

    #[test]
    fn prompt_reports_unknown_duration_without_segments() {
        let transcript = Transcript {
            text: String::new(),
            segments: vec![],
        };
        let prompt = build_metadata_prompt(&transcript, "demo");
        assert!(prompt.contains("Duration: unknown"));
    }
}
