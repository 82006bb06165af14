//! The standard adventure vocabulary.
//!
//! Verbs, prepositions and abbreviations common to Zork-style games. A game
//! merges its own objects (and any extra verbs) on top of this with
//! [`Vocabulary::standard_with`](crate::Vocabulary::standard_with).

use crate::record::{ObjectKind, VerbCategory, VerbRecord, VocabularySource};

use ObjectKind::{Container, Creature, Food, LightSource, Scenery};
use VerbCategory::{Interaction, Magic, Movement, Object, System};

/// Prepositions recognised even when no verb names them.
pub const PREPOSITIONS: &[&str] = &[
    "in", "on", "under", "behind", "above", "below", "beside", "near", "to", "from", "through",
    "into", "onto", "toward", "with", "using", "by", "at", "about", "off", "over", "across",
    "inside", "for",
];

/// Single-word abbreviations expanded before parsing.
pub const ABBREVIATIONS: &[(&str, &str)] = &[
    ("n", "north"),
    ("s", "south"),
    ("e", "east"),
    ("w", "west"),
    ("ne", "northeast"),
    ("nw", "northwest"),
    ("se", "southeast"),
    ("sw", "southwest"),
    ("u", "up"),
    ("d", "down"),
    ("x", "examine"),
    ("l", "look"),
    ("i", "inventory"),
    ("z", "wait"),
    ("g", "again"),
    ("q", "quit"),
];

fn direction(id: &str, aliases: &[&str]) -> VerbRecord {
    VerbRecord::new(id)
        .category(Movement)
        .aliases(aliases.iter().copied())
        .intransitive()
        .help(format!("Walk {id}, if there is an exit that way."))
        .examples([id])
}

fn movement_verbs() -> Vec<VerbRecord> {
    vec![
        VerbRecord::new("go")
            .category(Movement)
            .aliases(["walk", "travel", "head", "run", "proceed"])
            .requires_object()
            .prepositions(["to", "through", "into", "toward"])
            .help("Walk in a direction or towards a place.")
            .examples(["go north", "go through door"]),
        direction("north", &["northward", "nor"]),
        direction("south", &["southward", "sou"]),
        direction("east", &["eastward", "eas"]),
        direction("west", &["westward", "wes"]),
        direction("northeast", &[]),
        direction("northwest", &[]),
        direction("southeast", &[]),
        direction("southwest", &[]),
        direction("up", &["upward", "upstairs"]),
        direction("down", &["downward", "downstairs", "descend"]),
        VerbRecord::new("enter")
            .category(Movement)
            .aliases(["in", "inside", "go in"])
            .help("Go inside something, or inwards.")
            .examples(["enter", "enter house"]),
        VerbRecord::new("exit")
            .category(Movement)
            .aliases(["out", "outside", "leave", "go out"])
            .help("Go outside, or leave something you are in.")
            .examples(["exit", "exit boat"]),
        VerbRecord::new("climb")
            .category(Movement)
            .aliases(["scale", "ascend", "climb up"])
            .prepositions(["up", "down", "on", "onto", "into", "over"])
            .examples(["climb tree", "climb down ladder"]),
        VerbRecord::new("jump")
            .category(Movement)
            .aliases(["leap", "hop"])
            .prepositions(["over", "across", "on", "into"])
            .examples(["jump", "jump over chasm"]),
        VerbRecord::new("swim")
            .category(Movement)
            .aliases(["wade", "dive"])
            .prepositions(["in", "across"])
            .examples(["swim"]),
        VerbRecord::new("follow")
            .category(Movement)
            .aliases(["chase", "pursue"])
            .requires_object()
            .applies_to([Creature])
            .examples(["follow thief"]),
    ]
}

fn object_verbs() -> Vec<VerbRecord> {
    vec![
        VerbRecord::new("take")
            .category(Object)
            .aliases(["get", "grab", "carry", "pick", "pick up", "acquire", "obtain", "hold"])
            .requires_object()
            .prepositions(["from", "off", "out"])
            .help("Pick up an object and add it to your inventory.")
            .examples(["take lamp", "take coin from chest"]),
        VerbRecord::new("drop")
            .category(Object)
            .aliases(["discard", "release", "put down", "dump"])
            .requires_object()
            .help("Drop something you are carrying.")
            .examples(["drop sword"]),
        VerbRecord::new("put")
            .category(Object)
            .aliases(["place", "insert", "set", "stuff"])
            .requires_object()
            .requires_indirect_object()
            .prepositions(["in", "into", "on", "onto", "under", "behind", "inside"])
            .help("Place something in or on something else.")
            .examples(["put coin in chest"]),
        VerbRecord::new("open")
            .category(Object)
            .aliases(["pry", "pry open"])
            .requires_object()
            .prepositions(["with"])
            .applies_to([Container, Scenery])
            .examples(["open mailbox", "open door with key"]),
        VerbRecord::new("close")
            .category(Object)
            .aliases(["shut", "slam"])
            .requires_object()
            .applies_to([Container, Scenery])
            .examples(["close door"]),
        VerbRecord::new("lock")
            .category(Object)
            .requires_object()
            .requires_indirect_object()
            .prepositions(["with"])
            .applies_to([Container, Scenery])
            .examples(["lock grate with key"]),
        VerbRecord::new("unlock")
            .category(Object)
            .requires_object()
            .requires_indirect_object()
            .prepositions(["with"])
            .applies_to([Container, Scenery])
            .examples(["unlock grate with key"]),
        VerbRecord::new("examine")
            .category(Object)
            .aliases(["look at", "inspect", "study", "check", "describe", "observe"])
            .requires_object()
            .help("Look closely at something.")
            .examples(["examine lamp", "look at painting"]),
        VerbRecord::new("look")
            .category(Object)
            .aliases(["see", "gaze", "peer", "look around"])
            .prepositions(["under", "behind", "through", "in", "inside", "around"])
            .help("Describe your surroundings, or look under or behind something.")
            .examples(["look", "look under rug"]),
        VerbRecord::new("search")
            .category(Object)
            .aliases(["look in", "look inside", "hunt", "seek", "rummage"])
            .requires_object()
            .examples(["search leaves"]),
        VerbRecord::new("read")
            .category(Object)
            .aliases(["peruse", "skim"])
            .requires_object()
            .examples(["read leaflet"]),
        VerbRecord::new("light")
            .category(Object)
            .aliases(["turn on", "switch on", "ignite", "kindle"])
            .requires_object()
            .prepositions(["with"])
            .applies_to([LightSource])
            .examples(["turn on lamp", "light candles with match"]),
        VerbRecord::new("extinguish")
            .category(Object)
            .aliases(["turn off", "switch off", "douse", "put out", "snuff"])
            .requires_object()
            .applies_to([LightSource])
            .examples(["turn off lamp"]),
        VerbRecord::new("turn")
            .category(Object)
            .aliases(["rotate", "twist", "spin", "crank"])
            .requires_object()
            .prepositions(["to", "with"])
            .examples(["turn bolt with wrench"]),
        VerbRecord::new("move")
            .category(Object)
            .aliases(["shift", "slide", "roll"])
            .requires_object()
            .examples(["move rug"]),
        VerbRecord::new("push")
            .category(Object)
            .aliases(["press", "shove", "poke"])
            .requires_object()
            .examples(["push button"]),
        VerbRecord::new("pull")
            .category(Object)
            .aliases(["tug", "yank", "drag"])
            .requires_object()
            .examples(["pull lever"]),
        VerbRecord::new("touch")
            .category(Object)
            .aliases(["feel", "rub", "pat", "stroke"])
            .requires_object()
            .examples(["touch mirror"]),
        VerbRecord::new("shake")
            .category(Object)
            .aliases(["rattle", "jiggle"])
            .requires_object()
            .examples(["shake bottle"]),
        VerbRecord::new("wear")
            .category(Object)
            .aliases(["put on", "don"])
            .requires_object()
            .examples(["wear cloak"]),
        VerbRecord::new("remove")
            .category(Object)
            .aliases(["take off", "doff"])
            .requires_object()
            .examples(["remove cloak"]),
        VerbRecord::new("fill")
            .category(Object)
            .aliases(["refill"])
            .requires_object()
            .prepositions(["with", "from"])
            .applies_to([Container])
            .examples(["fill bottle with water"]),
        VerbRecord::new("pour")
            .category(Object)
            .aliases(["spill", "sprinkle"])
            .requires_object()
            .prepositions(["on", "into", "onto"])
            .examples(["pour water on plant"]),
        VerbRecord::new("empty")
            .category(Object)
            .aliases(["unload"])
            .requires_object()
            .applies_to([Container])
            .examples(["empty sack"]),
        VerbRecord::new("tie")
            .category(Object)
            .aliases(["fasten", "bind", "attach"])
            .requires_object()
            .prepositions(["to"])
            .examples(["tie rope to railing"]),
        VerbRecord::new("untie")
            .category(Object)
            .aliases(["unfasten", "unbind", "detach"])
            .requires_object()
            .prepositions(["from"])
            .examples(["untie rope"]),
        VerbRecord::new("cut")
            .category(Object)
            .aliases(["slice", "chop", "carve"])
            .requires_object()
            .prepositions(["with"])
            .examples(["cut rope with knife"]),
        VerbRecord::new("break")
            .category(Object)
            .aliases(["smash", "shatter", "destroy", "crack"])
            .requires_object()
            .prepositions(["with"])
            .examples(["break window with rock"]),
        VerbRecord::new("dig")
            .category(Object)
            .aliases(["excavate", "shovel"])
            .prepositions(["in", "with"])
            .examples(["dig in sand with shovel"]),
        VerbRecord::new("eat")
            .category(Object)
            .aliases(["consume", "devour", "munch", "bite"])
            .requires_object()
            .applies_to([Food])
            .examples(["eat sandwich"]),
        VerbRecord::new("drink")
            .category(Object)
            .aliases(["sip", "quaff", "swallow", "gulp"])
            .requires_object()
            .applies_to([Food])
            .examples(["drink water"]),
        VerbRecord::new("smell")
            .category(Object)
            .aliases(["sniff"])
            .examples(["smell garlic"]),
        VerbRecord::new("taste")
            .category(Object)
            .aliases(["lick"])
            .requires_object()
            .examples(["taste sauce"]),
        VerbRecord::new("listen")
            .category(Object)
            .aliases(["hear", "listen to"])
            .prepositions(["to"])
            .examples(["listen", "listen to door"]),
        VerbRecord::new("count")
            .category(Object)
            .aliases(["tally"])
            .requires_object()
            .examples(["count coins"]),
        VerbRecord::new("inflate")
            .category(Object)
            .aliases(["blow up"])
            .requires_object()
            .prepositions(["with"])
            .examples(["inflate boat with pump"]),
        VerbRecord::new("burn")
            .category(Object)
            .aliases(["incinerate", "set fire to"])
            .requires_object()
            .prepositions(["with"])
            .examples(["burn leaflet with torch"]),
        VerbRecord::new("wave")
            .category(Object)
            .aliases(["brandish", "flourish"])
            .requires_object()
            .examples(["wave sceptre"]),
        VerbRecord::new("ring")
            .category(Object)
            .aliases(["chime", "toll"])
            .requires_object()
            .examples(["ring bell"]),
    ]
}

fn interaction_verbs() -> Vec<VerbRecord> {
    vec![
        VerbRecord::new("attack")
            .category(Interaction)
            .aliases(["kill", "fight", "hit", "strike", "stab", "slay", "murder", "punch"])
            .requires_object()
            .prepositions(["with"])
            .applies_to([Creature])
            .help("Attack a creature, optionally with a weapon.")
            .examples(["attack troll with sword"]),
        VerbRecord::new("give")
            .category(Interaction)
            .aliases(["offer", "hand", "donate", "feed"])
            .requires_object()
            .requires_indirect_object()
            .prepositions(["to"])
            .help("Give something you carry to someone.")
            .examples(["give lunch to troll"]),
        VerbRecord::new("show")
            .category(Interaction)
            .aliases(["display", "present"])
            .requires_object()
            .requires_indirect_object()
            .prepositions(["to"])
            .examples(["show map to wizard"]),
        VerbRecord::new("throw")
            .category(Interaction)
            .aliases(["toss", "hurl", "chuck", "fling", "lob"])
            .requires_object()
            .prepositions(["at", "to", "into", "over"])
            .examples(["throw knife at thief"]),
        VerbRecord::new("use")
            .category(Interaction)
            .aliases(["operate", "activate", "utilize", "employ", "apply"])
            .requires_object()
            .prepositions(["on", "with"])
            .examples(["use key on door"]),
        VerbRecord::new("talk")
            .category(Interaction)
            .aliases(["talk to", "chat", "converse", "speak to", "speak with"])
            .requires_object()
            .prepositions(["about"])
            .applies_to([Creature])
            .examples(["talk to wizard", "talk to wizard about ring"]),
        VerbRecord::new("ask")
            .category(Interaction)
            .aliases(["question", "query", "inquire"])
            .requires_object()
            .prepositions(["about", "for"])
            .applies_to([Creature])
            .examples(["ask troll about bridge"]),
        VerbRecord::new("tell")
            .category(Interaction)
            .aliases(["inform", "warn"])
            .requires_object()
            .prepositions(["about"])
            .applies_to([Creature])
            .examples(["tell thief about treasure"]),
        VerbRecord::new("say")
            .category(Interaction)
            .aliases(["speak", "utter", "whisper"])
            .free_text()
            .prepositions(["to"])
            .examples(["say hello", "say hello to troll"]),
        VerbRecord::new("yell")
            .category(Interaction)
            .aliases(["shout", "scream", "holler", "cry"])
            .free_text()
            .examples(["yell", "yell help"]),
        VerbRecord::new("greet")
            .category(Interaction)
            .aliases(["hello", "hi", "salute"])
            .applies_to([Creature])
            .examples(["greet troll"]),
        VerbRecord::new("kiss")
            .category(Interaction)
            .aliases(["embrace", "hug"])
            .requires_object()
            .applies_to([Creature])
            .examples(["kiss frog"]),
        VerbRecord::new("wake")
            .category(Interaction)
            .aliases(["awaken", "rouse", "wake up"])
            .requires_object()
            .applies_to([Creature])
            .examples(["wake dragon"]),
        VerbRecord::new("knock")
            .category(Interaction)
            .aliases(["rap", "bang"])
            .prepositions(["on", "at"])
            .examples(["knock on door"]),
    ]
}

fn magic_verbs() -> Vec<VerbRecord> {
    vec![
        VerbRecord::new("cast")
            .category(Magic)
            .aliases(["invoke", "conjure"])
            .requires_object()
            .free_text()
            .prepositions(["on", "at"])
            .help("Cast a spell you know, optionally on something.")
            .examples(["cast frotz on lamp"]),
        VerbRecord::new("incant")
            .category(Magic)
            .aliases(["chant", "intone"])
            .free_text()
            .examples(["incant mumbo jumbo"]),
        VerbRecord::new("enchant")
            .category(Magic)
            .aliases(["bewitch", "charm"])
            .requires_object()
            .prepositions(["with"])
            .examples(["enchant sword"]),
        VerbRecord::new("dispel")
            .category(Magic)
            .aliases(["disenchant", "unweave"])
            .requires_object()
            .examples(["dispel ward"]),
        VerbRecord::new("pray")
            .category(Magic)
            .aliases(["worship"])
            .intransitive()
            .examples(["pray"]),
        VerbRecord::new("xyzzy")
            .category(Magic)
            .aliases(["plugh", "plover"])
            .intransitive()
            .examples(["xyzzy"]),
    ]
}

fn system_verbs() -> Vec<VerbRecord> {
    vec![
        VerbRecord::new("inventory")
            .category(System)
            .aliases(["inv", "items", "possessions"])
            .intransitive()
            .help("List what you are carrying.")
            .examples(["inventory"]),
        VerbRecord::new("wait")
            .category(System)
            .aliases(["stay", "rest"])
            .intransitive()
            .examples(["wait"]),
        VerbRecord::new("sleep")
            .category(System)
            .aliases(["nap", "doze"])
            .intransitive()
            .examples(["sleep"]),
        VerbRecord::new("score")
            .category(System)
            .aliases(["points"])
            .intransitive()
            .examples(["score"]),
        VerbRecord::new("save")
            .category(System)
            .intransitive()
            .examples(["save"]),
        VerbRecord::new("restore")
            .category(System)
            .aliases(["load"])
            .intransitive()
            .examples(["restore"]),
        VerbRecord::new("restart")
            .category(System)
            .aliases(["reset game", "new game"])
            .intransitive()
            .examples(["restart"]),
        VerbRecord::new("quit")
            .category(System)
            .aliases(["bye", "end game"])
            .intransitive()
            .help("Leave the game.")
            .examples(["quit"]),
        VerbRecord::new("help")
            .category(System)
            .aliases(["commands", "hint", "hints"])
            .free_text()
            .help("Show help, or help for a particular verb.")
            .examples(["help", "help take"]),
        VerbRecord::new("again")
            .category(System)
            .aliases(["repeat"])
            .intransitive()
            .help("Repeat your last command.")
            .examples(["again"]),
        VerbRecord::new("undo")
            .category(System)
            .intransitive()
            .examples(["undo"]),
        VerbRecord::new("verbose")
            .category(System)
            .intransitive()
            .examples(["verbose"]),
        VerbRecord::new("brief")
            .category(System)
            .aliases(["superbrief"])
            .intransitive()
            .examples(["brief"]),
        VerbRecord::new("diagnose")
            .category(System)
            .aliases(["health", "status"])
            .intransitive()
            .examples(["diagnose"]),
    ]
}

/// The standard vocabulary feed.
pub fn standard_source() -> VocabularySource {
    let verbs = movement_verbs()
        .into_iter()
        .chain(object_verbs())
        .chain(interaction_verbs())
        .chain(magic_verbs())
        .chain(system_verbs())
        .collect();

    VocabularySource {
        verbs,
        objects: Vec::new(),
        abbreviations: ABBREVIATIONS
            .iter()
            .map(|(short, long)| (short.to_string(), long.to_string()))
            .collect(),
        prepositions: PREPOSITIONS.iter().map(|p| p.to_string()).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Vocabulary;

    #[test]
    fn standard_vocabulary_builds() {
        let vocab = Vocabulary::standard().unwrap();
        assert!(vocab.verb_count() > 80);
        assert!(vocab.verb_keys().count() > 200);
        assert_eq!(vocab.longest_verb_phrase(), 3);
    }

    #[test]
    fn multi_word_aliases_resolve() {
        let vocab = Vocabulary::standard().unwrap();
        assert_eq!(vocab.lookup_verb("pick up").unwrap().id.as_str(), "take");
        assert_eq!(vocab.lookup_verb("look at").unwrap().id.as_str(), "examine");
        assert_eq!(vocab.lookup_verb("turn on").unwrap().id.as_str(), "light");
        assert_eq!(vocab.lookup_verb("set fire to").unwrap().id.as_str(), "burn");
    }

    #[test]
    fn clipped_directions_resolve() {
        let vocab = Vocabulary::standard().unwrap();
        for (clipped, full) in [("nor", "north"), ("sou", "south"), ("eas", "east"), ("wes", "west")] {
            assert_eq!(vocab.lookup_verb(clipped).unwrap().id.as_str(), full);
        }
    }

    #[test]
    fn canonical_ids_beat_aliases() {
        let vocab = Vocabulary::standard().unwrap();
        // "exit" is also a plausible synonym for quitting.
        assert_eq!(vocab.lookup_verb("exit").unwrap().id.as_str(), "exit");
        assert_eq!(vocab.lookup_verb("leave").unwrap().id.as_str(), "exit");
    }

    #[test]
    fn every_abbreviation_expands_to_a_verb() {
        let vocab = Vocabulary::standard().unwrap();
        for (short, long) in vocab.abbreviations() {
            assert!(vocab.lookup_verb(long).is_some(), "{short} -> {long}");
        }
    }
}
