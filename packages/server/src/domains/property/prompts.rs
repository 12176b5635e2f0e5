//! Prompt builders for the property pipeline.
//!
//! Prompt wording is load-bearing: the extraction service and the model are
//! both steered entirely by these strings, so edits here change behavior.

use super::types::SearchParameters;

/// Instruction for turning a free-text query into a JSON parameter object.
pub fn interpreter_prompt(query: &str) -> String {
    format!(
        r#"Extract real estate search parameters from the following user query:

User query: "{query}"

Extract these parameters:
1. City name (required)
2. Maximum price in crores (default is 5 crores if not specified)
3. Property category: "Residential" or "Commercial" (default is "Residential" if not specified)
4. Property type: "Flat" or "Individual House" (default is "Flat" if not specified)

Output in JSON format:
{{
    "city": "extracted city name",
    "max_price": extracted price as a number or null if not specified,
    "property_category": "extracted category or default",
    "property_type": "extracted type or default"
}}

Only output valid JSON, no explanations or additional text.
"#
    )
}

/// Extraction-service instruction for the listing sources.
pub fn listing_extraction_prompt(params: &SearchParameters) -> String {
    format!(
        r#"Extract ONLY 5 OR LESS different {category} {type_label} from {city} that cost less than {max_price} crores.

Requirements:
- Property Category: {category} properties only
- Property Type: {type_label} only
- Location: {city}
- Maximum Price: {max_price} crores
- Include complete property details with exact location
- IMPORTANT: Return data for at least 3 different properties. MAXIMUM 5.
- Format as a list of properties with their respective details
"#,
        category = params.property_category,
        type_label = params.property_type.plural_label(),
        city = params.city,
        max_price = params.max_price,
    )
}

/// Analysis instruction producing the two-section listing report.
pub fn listing_analysis_prompt(properties_json: &str, params: &SearchParameters) -> String {
    format!(
        r#"As a real estate expert, analyze these properties and market trends:

Properties Found in json format:
{properties_json}

**IMPORTANT INSTRUCTIONS:**
1. ONLY analyze properties from the above JSON data that match the user's requirements:
   - Property Category: {category}
   - Property Type: {property_type}
   - Maximum Price: {max_price} crores
2. DO NOT create new categories or property types
3. From the matching properties, select 5-6 properties with prices closest to {max_price} crores

Please provide your analysis in this format:

🏠 SELECTED PROPERTIES
• List only 5-6 best matching properties with prices closest to {max_price} crores
• For each property include:
  - Name and Location
  - Price (with value analysis)
  - Key Features
  - Pros and Cons

💰 BEST VALUE ANALYSIS
• Compare the selected properties based on:
  - Price per sq ft
  - Location advantage
  - Amenities offered

Format your response in a clear, structured way using the above sections.
"#,
        category = params.property_category,
        property_type = params.property_type,
        max_price = params.max_price,
    )
}

/// Extraction-service instruction for the locality price-trends source.
pub fn trends_extraction_prompt() -> &'static str {
    r#"Extract price trends data for ALL major localities in the city.
IMPORTANT:
- Return data for at least 5-10 different localities
- Include both premium and affordable areas
- Do not skip any locality mentioned in the source
- Format as a list of locations with their respective data
"#
}

/// Analysis instruction producing the four-section trends report.
pub fn trends_analysis_prompt(city: &str, locations_json: &str) -> String {
    format!(
        r#"As a real estate expert, analyze these location price trends for {city}:

{locations_json}

Please provide:
1. A bullet-point summary of the price trends for each location
2. Identify the top 3 locations with:
   - Highest price appreciation
   - Best rental yields
   - Best value for money
3. Investment recommendations:
   - Best locations for long-term investment
   - Best locations for rental income
   - Areas showing emerging potential
4. Specific advice for investors based on these trends

Format the response as follows:

📊 LOCATION TRENDS SUMMARY
• [Bullet points for each location]

🏆 TOP PERFORMING AREAS
• [Bullet points for best areas]

💡 INVESTMENT INSIGHTS
• [Bullet points with investment advice]

🎯 RECOMMENDATIONS
• [Bullet points with specific recommendations]
"#
    )
}
