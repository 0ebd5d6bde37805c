use poise::serenity_prelude::RoleId;
use tracing::warn;

use crate::db::LanguageRole;

/// Language roles a member holds, in language board order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemberLanguages {
    entries: Vec<(RoleId, LanguageRole)>,
}

impl MemberLanguages {
    pub fn matching(board: &[LanguageRole], roles: &[RoleId]) -> Self {
        let entries = board
            .iter()
            .filter_map(|language| {
                let Some(role_id) = language.role() else {
                    warn!(
                        role_name = %language.role_name,
                        "⚠️ [MEMBERS] language role with invalid id skipped"
                    );
                    return None;
                };
                roles
                    .contains(&role_id)
                    .then(|| (role_id, language.clone()))
            })
            .collect();
        Self { entries }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// One language name per line, each line newline-terminated.
    pub fn listing(&self) -> String {
        self.entries
            .iter()
            .map(|(_, language)| format!("{}\n", language.role_name))
            .collect()
    }

    /// Reaction emoji keyed by the role they stand for.
    pub fn emojis(&self) -> impl Iterator<Item = (RoleId, &str)> {
        self.entries
            .iter()
            .map(|(role_id, language)| (*role_id, language.emoji_repr.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board() -> Vec<LanguageRole> {
        [(30, "Python", "🐍"), (31, "Rust", "🦀"), (32, "Go", "<:gopher:77>")]
            .into_iter()
            .map(|(id, name, emoji)| LanguageRole {
                role_id: id,
                role_name: name.to_string(),
                emoji_repr: emoji.to_string(),
            })
            .collect()
    }

    #[test]
    fn keeps_board_order() {
        let roles = [RoleId::new(32), RoleId::new(99), RoleId::new(30)];

        let languages = MemberLanguages::matching(&board(), &roles);

        assert_eq!(languages.listing(), "Python\nGo\n");
        let emojis: Vec<_> = languages.emojis().collect();
        assert_eq!(
            emojis,
            vec![(RoleId::new(30), "🐍"), (RoleId::new(32), "<:gopher:77>")]
        );
    }

    #[test]
    fn empty_without_language_roles() {
        let languages = MemberLanguages::matching(&board(), &[RoleId::new(5)]);

        assert!(languages.is_empty());
        assert_eq!(languages.listing(), "");
        assert_eq!(languages.emojis().count(), 0);
    }

    #[test]
    fn rows_with_zero_id_are_skipped() {
        let mut board = board();
        board.insert(
            0,
            LanguageRole {
                role_id: 0,
                role_name: "Broken".to_string(),
                emoji_repr: "💥".to_string(),
            },
        );

        let languages = MemberLanguages::matching(&board, &[RoleId::new(31)]);

        assert_eq!(languages.listing(), "Rust\n");
        assert!(MemberLanguages::matching(&board, &[RoleId::new(5)]).is_empty());
    }
}
