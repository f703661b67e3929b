//! Cross-table reference checks.
//!
//! Loaders only check that each file parses. A snapshot can still name an
//! item, effect, monster, codex entry or quest that does not exist; the rules
//! treat those as absent, so they are caught here before a session starts.

use std::collections::BTreeSet;

use auren_core::ContentSnapshot;
use auren_core::env::{Behavior, NextStep, Objective, OnHitProc, Special, Trigger};

/// One problem found in a content snapshot.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ValidationIssue {
    #[error("{owner}: unknown item '{item}'")]
    UnknownItem { owner: String, item: String },

    #[error("{owner}: unknown effect '{effect}'")]
    UnknownEffect { owner: String, effect: String },

    #[error("{owner}: unknown monster '{monster}'")]
    UnknownMonster { owner: String, monster: String },

    #[error("{owner}: unknown codex entry '{entry}'")]
    UnknownCodexEntry { owner: String, entry: String },

    #[error("{owner}: next step '{quest}' is not a main-quest step")]
    UnknownQuest { owner: String, quest: String },

    #[error("{owner}: {field} is {value}%, above 100")]
    PercentOutOfRange {
        owner: String,
        field: &'static str,
        value: u32,
    },

    #[error("quest id '{0}' is declared more than once")]
    DuplicateQuest(String),

    #[error("the main quest has no steps")]
    EmptyMainQuest,
}

/// Checks every cross-table reference in `content`. An empty result means
/// the snapshot is safe to play.
pub fn validate(content: &ContentSnapshot) -> Vec<ValidationIssue> {
    let mut report = Report {
        content,
        issues: Vec::new(),
    };

    report.items();
    report.codex();
    report.monsters();
    report.main_quest();
    report.side_quests();
    report.rules();

    report.issues
}

struct Report<'a> {
    content: &'a ContentSnapshot,
    issues: Vec<ValidationIssue>,
}

impl Report<'_> {
    fn items(&mut self) {
        let content = self.content;
        for item in content.items.values() {
            let owner = format!("item {}", item.id);
            if let Some(proc_) = &item.on_hit {
                self.on_hit(&owner, proc_);
            }
            if let Some(special) = item.special {
                self.special(&owner, special);
            }
        }
    }

    fn codex(&mut self) {
        let content = self.content;
        for entry in content.codex.values() {
            let owner = format!("codex {}", entry.id);
            if let Some(proc_) = &entry.on_hit {
                self.on_hit(&owner, proc_);
            }
            if let Some(effect) = &entry.combat_effect {
                self.effect(&owner, effect.effect.as_str());
            }
            if let Some(special) = entry.special {
                self.special(&owner, special);
            }
        }
    }

    fn monsters(&mut self) {
        let content = self.content;
        for monster in content.monsters.values() {
            let owner = format!("monster {}", monster.id);
            for loot in &monster.loot {
                self.item(&owner, loot.item.as_str());
                self.percent(&owner, "loot chance", loot.chance);
            }
            for proc_ in &monster.on_hit {
                self.on_hit(&owner, proc_);
            }
            for entry in &monster.behaviors {
                self.percent(&owner, "behavior chance", entry.chance);
                for trigger in &entry.when {
                    if let Trigger::HealthPercentAtMost(percent) = trigger {
                        self.percent(&owner, "health trigger", *percent);
                    }
                }
                if let Behavior::LifeDrain { heal_percent, .. } = entry.behavior {
                    self.percent(&owner, "life drain heal", heal_percent);
                }
            }
        }
    }

    fn main_quest(&mut self) {
        let content = self.content;
        let steps = &content.main_quest;
        if steps.is_empty() {
            self.issues.push(ValidationIssue::EmptyMainQuest);
        }

        let mut known = BTreeSet::new();
        for step in steps {
            if !known.insert(step.id.as_str()) {
                self.issues.push(ValidationIssue::DuplicateQuest(step.id.to_string()));
            }
        }

        for step in steps {
            let owner = format!("quest {}", step.id);
            self.objective(&owner, &step.objective);
            if let Some(entry) = &step.requires_focused_echo {
                self.codex_entry(&owner, entry.as_str());
            }
            let successors = match &step.next {
                NextStep::Step(next) => vec![next],
                NextStep::Branch { hero, reckless } => vec![hero, reckless],
                NextStep::End => Vec::new(),
            };
            for next in successors {
                if !known.contains(next.as_str()) {
                    self.issues.push(ValidationIssue::UnknownQuest {
                        owner: owner.clone(),
                        quest: next.to_string(),
                    });
                }
            }
        }
    }

    fn side_quests(&mut self) {
        let content = self.content;
        let main: BTreeSet<&str> = content
            .main_quest
            .iter()
            .map(|step| step.id.as_str())
            .collect();
        let mut seen = BTreeSet::new();

        for quest in &content.side_quests {
            let id = quest.id.as_str();
            if main.contains(id) || !seen.insert(id) {
                self.issues.push(ValidationIssue::DuplicateQuest(id.to_owned()));
            }
            self.objective(&format!("quest {id}"), &quest.objective);
        }
    }

    fn rules(&mut self) {
        let content = self.content;
        let rules = &content.rules;
        let consumables = &rules.consumables;
        for effect in consumables.potion_cures.iter().chain(&consumables.purify_cures) {
            self.effect("rules", effect.as_str());
        }
        for item in &rules.start.inventory {
            self.item("starting kit", item.as_str());
        }
        self.percent("rules", "potion find chance", consumables.potion_find_chance);
    }

    fn objective(&mut self, owner: &str, objective: &Objective) {
        match objective {
            Objective::Kill { monster, .. } => {
                if !self.content.monsters.contains_key(monster.as_str()) {
                    self.issues.push(ValidationIssue::UnknownMonster {
                        owner: owner.to_owned(),
                        monster: monster.to_string(),
                    });
                }
            }
            Objective::CollectEcho { entry } => self.codex_entry(owner, entry.as_str()),
            Objective::Visit { .. } | Objective::Talk { .. } => {}
        }
    }

    fn on_hit(&mut self, owner: &str, proc_: &OnHitProc) {
        self.effect(owner, proc_.effect.as_str());
        self.percent(owner, "on-hit chance", proc_.chance);
    }

    fn special(&mut self, owner: &str, special: Special) {
        match special {
            Special::Resist { percent, .. } => self.percent(owner, "resistance", percent),
            Special::EvadePhysical(chance) => self.percent(owner, "evade chance", chance),
        }
    }

    fn item(&mut self, owner: &str, item: &str) {
        if !self.content.items.contains_key(item) {
            self.issues.push(ValidationIssue::UnknownItem {
                owner: owner.to_owned(),
                item: item.to_owned(),
            });
        }
    }

    fn effect(&mut self, owner: &str, effect: &str) {
        if !self.content.effects.contains_key(effect) {
            self.issues.push(ValidationIssue::UnknownEffect {
                owner: owner.to_owned(),
                effect: effect.to_owned(),
            });
        }
    }

    fn codex_entry(&mut self, owner: &str, entry: &str) {
        if !self.content.codex.contains_key(entry) {
            self.issues.push(ValidationIssue::UnknownCodexEntry {
                owner: owner.to_owned(),
                entry: entry.to_owned(),
            });
        }
    }

    fn percent(&mut self, owner: &str, field: &'static str, value: u32) {
        if value > 100 {
            self.issues.push(ValidationIssue::PercentOutOfRange {
                owner: owner.to_owned(),
                field,
                value,
            });
        }
    }

}

#[cfg(test)]
mod tests {
    use super::*;
    use auren_core::RulesTable;
    use auren_core::env::{
        BehaviorEntry, CodexEntry, EffectDefinition, EffectKind, MainQuestStep, MonsterTemplate,
        QuestReward, SideQuest,
    };
    use auren_core::state::QuestId;

    fn minimal() -> ContentSnapshot {
        ContentSnapshot::new(RulesTable::default())
            .with_effects([
                EffectDefinition::new("poison", "Poisoned", EffectKind::DamageOverTime(2)),
                EffectDefinition::new("burn", "Burning", EffectKind::DamageOverTime(3)),
                EffectDefinition::new("bleed", "Bleeding", EffectKind::DamageOverTime(2)),
            ])
            .with_items([auren_core::env::ItemDefinition::new(
                "rusted_sword",
                "Rusted Sword",
                auren_core::env::EquipSlot::Weapon,
            )])
            .with_main_quest([MainQuestStep::new(
                "mq_01",
                "Start",
                Objective::Visit {
                    location: "town".into(),
                },
                NextStep::End,
            )])
    }

    #[test]
    fn minimal_content_is_clean() {
        assert_eq!(validate(&minimal()), Vec::new());
    }

    #[cfg(feature = "loaders")]
    #[test]
    fn shipped_content_is_clean() {
        let content = crate::bundled().unwrap();
        assert_eq!(validate(&content), Vec::new());
    }

    #[test]
    fn dangling_references_are_reported() {
        let content = minimal()
            .with_monsters([MonsterTemplate::new("wolf", "Wolf", 25, 4, 8, 15)
                .with_loot("fang", 5)
                .with_on_hit(OnHitProc::new("stun", 15, 1))])
            .with_codex([CodexEntry::new("shrine", "Shrine").with_combat_effect("regen", 99)])
            .with_main_quest([MainQuestStep::new(
                "mq_02",
                "Hunt",
                Objective::Kill {
                    monster: "dragon".into(),
                    count: 1,
                },
                NextStep::Step(QuestId::new("mq_99")),
            )])
            .with_side_quests([SideQuest::new(
                "sq_01",
                "Lost",
                Objective::CollectEcho {
                    entry: "missing".into(),
                },
                QuestReward::new(10, 10),
                1,
            )]);

        let issues = validate(&content);
        let expected = [
            ValidationIssue::UnknownEffect {
                owner: "codex shrine".into(),
                effect: "regen".into(),
            },
            ValidationIssue::UnknownItem {
                owner: "monster wolf".into(),
                item: "fang".into(),
            },
            ValidationIssue::UnknownEffect {
                owner: "monster wolf".into(),
                effect: "stun".into(),
            },
            ValidationIssue::UnknownMonster {
                owner: "quest mq_02".into(),
                monster: "dragon".into(),
            },
            ValidationIssue::UnknownQuest {
                owner: "quest mq_02".into(),
                quest: "mq_99".into(),
            },
            ValidationIssue::UnknownCodexEntry {
                owner: "quest sq_01".into(),
                entry: "missing".into(),
            },
        ];
        assert_eq!(issues, expected);
    }

    #[test]
    fn percentages_above_one_hundred_are_reported() {
        let content = minimal().with_monsters([MonsterTemplate::new("slime", "Slime", 30, 2, 9, 12)
            .with_behavior(
                BehaviorEntry::new(150, Behavior::Heal { amount: 5 })
                    .when(Trigger::HealthPercentAtMost(120)),
            )]);

        let issues = validate(&content);
        assert_eq!(issues.len(), 2);
        assert_eq!(
            issues[0].to_string(),
            "monster slime: behavior chance is 150%, above 100"
        );
    }

    #[test]
    fn duplicate_quest_ids_are_reported() {
        let side = |id: &str| {
            SideQuest::new(
                id,
                "Again",
                Objective::Talk { npc: "lira".into() },
                QuestReward::default(),
                1,
            )
        };
        let content = minimal().with_side_quests([side("sq_01"), side("sq_01"), side("mq_01")]);

        let issues = validate(&content);
        assert_eq!(
            issues,
            vec![
                ValidationIssue::DuplicateQuest("sq_01".into()),
                ValidationIssue::DuplicateQuest("mq_01".into()),
            ]
        );
    }

    #[test]
    fn empty_main_quest_is_reported() {
        let content = ContentSnapshot::new(RulesTable::default());
        assert!(validate(&content).contains(&ValidationIssue::EmptyMainQuest));
    }
}
