pub const SUMMARIZE_CONTENT_PROMPT: &str = "You are an expert summarizer. Produce a clear, well-organized summary of the following content. Preserve the key facts, definitions, names, dates, numbers and relationships a student would need to answer questions about the material. Omit filler, navigation text and repetition. Write in plain prose or short paragraphs; do not invent information that is not in the content.

Content:
{content}

Return the summary. The output should be a JSON object with a single key \"summary\" containing the summary text.";

pub const EXTRACT_TEXT_FROM_PDF_PROMPT: &str = "You are an expert document processor. Extract all text content from the attached PDF document.
Return the extracted text. The output should be a JSON object with a single key \"extractedText\" containing the extracted text.";

pub const EXTRACT_CONTENT_FROM_URL_PROMPT: &str = "You are an expert web content extractor. Extract the main readable text content from the following fetched page content. Ignore navigation, ads, footers, and other non-essential elements. Focus on the primary article or body text.

Fetched Content:
{fetched_content}

Return the extracted text. The output should be a JSON object with a single key \"extractedText\" containing the extracted text.";

pub fn summarize_content_prompt(content: &str) -> String {
    SUMMARIZE_CONTENT_PROMPT.replace("{content}", content)
}

pub fn extract_content_from_url_prompt(fetched_content: &str) -> String {
    EXTRACT_CONTENT_FROM_URL_PROMPT.replace("{fetched_content}", fetched_content)
}
