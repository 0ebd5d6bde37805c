use poise::serenity_prelude::{Colour, CreateEmbed};

use crate::members::{MemberInfo, MemberLanguages, texts};

/// The #general post introducing a new Developer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Announcement {
    pub description: String,
    pub thumbnail: Option<String>,
    pub languages: Option<String>,
}

impl Announcement {
    pub fn new_developer(member: &MemberInfo, languages: &MemberLanguages) -> Self {
        Self {
            description: texts::announcement(&member.display_name),
            thumbnail: member.avatar_url.clone(),
            languages: (!languages.is_empty()).then(|| languages.listing()),
        }
    }

    pub fn to_embed(&self) -> CreateEmbed {
        let mut embed = CreateEmbed::new()
            .colour(Colour::BLUE)
            .description(&self.description);

        if let Some(url) = &self.thumbnail {
            embed = embed.thumbnail(url);
        }
        if let Some(languages) = &self.languages {
            embed = embed.field("Languages:", languages, true);
        }

        embed
    }
}
