//! Small content tables shared by unit tests.

use crate::env::{
    Behavior, BehaviorEntry, CodexEntry, ContentSnapshot, EffectDefinition, EffectKind, Element,
    EquipSlot, FixedRng, GameEnv, ItemDefinition, MainQuestStep, MonsterTemplate, NextStep,
    Objective, OnHitProc, QuestReward, RulesTable, SideQuest, Special, StatModifiers, StoryPath,
    Trigger, WorldChange,
};
use crate::state::{Player, QuestId};
use crate::stats::recompute_stats;

pub fn content() -> ContentSnapshot {
    ContentSnapshot::new(RulesTable::default())
        .with_effects([
            EffectDefinition::new("poison", "Poison", EffectKind::DamageOverTime(2)),
            EffectDefinition::new("burn", "Burn", EffectKind::DamageOverTime(3))
                .with_element(Element::Fire),
            EffectDefinition::new("bleed", "Bleed", EffectKind::DamageOverTime(2)),
            EffectDefinition::new("regen", "Regeneration", EffectKind::HealOverTime(2)),
            EffectDefinition::new("stun", "Stun", EffectKind::Control),
            EffectDefinition::new("sleep", "Sleep", EffectKind::Control).breaking_on_hit(),
            EffectDefinition::new("mana_drain", "Mana Drain", EffectKind::Drain),
        ])
        .with_items([
            ItemDefinition::new("rusted_sword", "Rusted Sword", EquipSlot::Weapon)
                .with_stats(StatModifiers::new(2, 0, 0, 0)),
            ItemDefinition::new("poison_dagger", "Poison Dagger", EquipSlot::Weapon)
                .with_stats(StatModifiers::new(1, 0, 0, 0))
                .with_on_hit(OnHitProc::new("poison", 30, 3)),
            ItemDefinition::new("leather_tunic", "Leather Tunic", EquipSlot::Armor)
                .with_stats(StatModifiers::new(0, 1, 5, 0)),
            ItemDefinition::new("acolyte_robe", "Acolyte's Robe", EquipSlot::Armor)
                .with_stats(StatModifiers::new(0, 2, 0, 0))
                .with_special(Special::Resist {
                    element: Element::Fire,
                    percent: 50,
                }),
            ItemDefinition::new("slime_core", "Slime Core", EquipSlot::Charm)
                .with_stats(StatModifiers::new(0, 0, 10, 0)),
            ItemDefinition::new("lucky_coin", "Lucky Coin", EquipSlot::Charm)
                .with_stats(StatModifiers::new(0, 0, 0, 10)),
            ItemDefinition::new("ghostly_pendant", "Ghostly Pendant", EquipSlot::Charm)
                .with_special(Special::EvadePhysical(10)),
        ])
        .with_codex([
            CodexEntry::new("echo_gift_01", "The First Echo")
                .with_buff(StatModifiers::new(1, 0, 0, 0)),
            CodexEntry::new("fallen_knight", "Fallen Knight")
                .with_buff(StatModifiers::new(2, -1, 0, 0)),
            CodexEntry::new("shrine_memory", "Shrine Memory")
                .with_buff(StatModifiers::new(0, 2, 5, 0))
                .with_combat_effect("regen", 99),
            CodexEntry::new("dragon_cultist_diary", "Cultist Diary").with_special(
                Special::Resist {
                    element: Element::Fire,
                    percent: 25,
                },
            ),
            CodexEntry::new("mirror_echo", "Mirror Echo")
                .with_buff(StatModifiers::new(1, 1, 0, 0))
                .with_collect_bonus(1, 0),
            CodexEntry::new("merchant_spirit", "Merchant Spirit")
                .with_buff(StatModifiers::new(0, 0, 0, 25)),
            CodexEntry::new("town_rumor", "Town Rumor"),
        ])
        .with_monsters([
            MonsterTemplate::new("goblin", "Goblin", 18, 3, 6, 10)
                .with_loot("rusted_sword", 10)
                .with_behavior(
                    BehaviorEntry::new(100, Behavior::Enrage { attack_bonus: 2 })
                        .when(Trigger::HealthAtMost(5))
                        .when(Trigger::NotEnraged),
                ),
            MonsterTemplate::new("dummy", "Training Dummy", 25, 1, 0, 0),
            MonsterTemplate::new("slime", "Slime", 30, 2, 9, 12).with_behavior(
                BehaviorEntry::new(50, Behavior::Heal { amount: 5 })
                    .when(Trigger::HealthAtMost(12)),
            ),
            MonsterTemplate::new("golem", "Golem", 65, 5, 28, 40).with_behavior(
                BehaviorEntry::new(30, Behavior::Harden).when(Trigger::NotHardened),
            ),
            MonsterTemplate::new("wolf", "Wolf", 25, 4, 8, 15)
                .with_on_hit(OnHitProc::new("stun", 15, 2))
                .with_behavior(BehaviorEntry::new(
                    30,
                    Behavior::MultiHit {
                        hits: 2,
                        damage_percent: 75,
                    },
                )),
            MonsterTemplate::new("orc", "Orc", 45, 6, 22, 30).with_behavior(BehaviorEntry::new(
                40,
                Behavior::HeavyStrike {
                    damage_percent: 180,
                },
            )),
            MonsterTemplate::new("dragon", "Dragon", 180, 14, 200, 0)
                .with_on_hit(OnHitProc::new("burn", 30, 3))
                .with_behavior(BehaviorEntry::new(
                    35,
                    Behavior::Breath {
                        damage: 15,
                        element: Element::Fire,
                    },
                ))
                .as_final_boss(),
            MonsterTemplate::new("ghost", "Ghost", 40, 6, 30, 40)
                .with_behavior(BehaviorEntry::new(25, Behavior::SabotageCooldown { turns: 3 })),
            MonsterTemplate::new("wraith", "Wraith", 70, 9, 50, 60).with_behavior(
                BehaviorEntry::new(
                    35,
                    Behavior::LifeDrain {
                        damage_percent: 120,
                        heal_percent: 50,
                    },
                ),
            ),
            MonsterTemplate::new("stalker", "Shadow Stalker", 20, 5, 10, 18)
                .with_on_hit(OnHitProc::new("bleed", 20, 3)),
            MonsterTemplate::new("shade", "Shade", 30, 3, 5, 5)
                .with_on_hit(OnHitProc::new("mana_drain", 100, 2)),
        ])
        .with_main_quest([
            MainQuestStep::new(
                "mq_01",
                "Reach the town",
                Objective::Visit {
                    location: "town".into(),
                },
                NextStep::Step(QuestId::new("mq_02")),
            ),
            MainQuestStep::new(
                "mq_02",
                "Speak with Lira",
                Objective::Talk { npc: "lira".into() },
                NextStep::Step(QuestId::new("mq_03")),
            )
            .requiring_echo("echo_gift_01"),
            MainQuestStep::new(
                "mq_03",
                "Clear the goblins",
                Objective::Kill {
                    monster: "goblin".into(),
                    count: 5,
                },
                NextStep::Step(QuestId::new("mq_04")),
            )
            .with_reward(100, 150),
            MainQuestStep::new(
                "mq_04",
                "Remember the fallen knight",
                Objective::CollectEcho {
                    entry: "fallen_knight".into(),
                },
                NextStep::Step(QuestId::new("mq_04_complete")),
            )
            .with_reward(50, 100),
            MainQuestStep::new(
                "mq_04_complete",
                "Report to the mayor",
                Objective::Talk {
                    npc: "mayor".into(),
                },
                NextStep::Branch {
                    hero: QuestId::new("mq_05_hero"),
                    reckless: QuestId::new("mq_05_reckless"),
                },
            )
            .with_min_attack(10),
            MainQuestStep::new(
                "mq_05_hero",
                "Face the sentinel",
                Objective::Kill {
                    monster: "golem".into(),
                    count: 1,
                },
                NextStep::Step(QuestId::new("mq_06_hero")),
            )
            .on_path(StoryPath::Hero)
            .completing_with(WorldChange::BreakSeal),
            MainQuestStep::new(
                "mq_05_reckless",
                "Slay the awakened dragon",
                Objective::Kill {
                    monster: "dragon".into(),
                    count: 1,
                },
                NextStep::End,
            )
            .on_path(StoryPath::Reckless)
            .starting_with(WorldChange::BreakSeal)
            .starting_with(WorldChange::GrantKey),
            MainQuestStep::new(
                "mq_06_hero",
                "Slay the dragon",
                Objective::Kill {
                    monster: "dragon".into(),
                    count: 1,
                },
                NextStep::End,
            )
            .on_path(StoryPath::Hero),
        ])
        .with_side_quests([
            SideQuest::new(
                "sq_slime",
                "Slime trouble",
                Objective::Kill {
                    monster: "slime".into(),
                    count: 6,
                },
                QuestReward::new(50, 70),
                1,
            ),
            SideQuest::new(
                "sq_goblin",
                "Goblin raiders",
                Objective::Kill {
                    monster: "goblin".into(),
                    count: 4,
                },
                QuestReward::new(60, 80),
                2,
            ),
            SideQuest::new(
                "sq_farmer",
                "The farmer's memory",
                Objective::CollectEcho {
                    entry: "merchant_spirit".into(),
                },
                QuestReward::new(100, 150),
                4,
            )
            .off_board(),
            SideQuest::new(
                "sq_orc",
                "Orc hunt",
                Objective::Kill {
                    monster: "orc".into(),
                    count: 1,
                },
                QuestReward::new(100, 130),
                7,
            ),
            SideQuest::new(
                "sq_wolves",
                "Corrupted pack",
                Objective::Kill {
                    monster: "wolf".into(),
                    count: 5,
                },
                QuestReward::new(250, 350),
                1,
            )
            .exclusive_to(StoryPath::Reckless),
        ])
}

pub fn env<'a>(content: &'a ContentSnapshot, rng: &'a FixedRng) -> GameEnv<'a> {
    GameEnv::from_snapshot(content, rng)
}

/// Fresh level-1 player with derived stats computed.
pub fn player(env: &GameEnv<'_>) -> Player {
    let rules = env.rules().expect("rules");
    let first = env.quests().expect("quests").first_main_step().cloned();
    let mut player = Player::new("Tester", rules, first);
    recompute_stats(&mut player, env).expect("stats");
    player
}
