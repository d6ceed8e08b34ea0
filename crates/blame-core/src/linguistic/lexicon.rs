/// Lexicon-driven part-of-speech and entity tagger.
///
/// Tagging runs in three passes over the tokenized text:
/// 1. lexical: closed-class tables, verb inflection, adjective suffixes
/// 2. contextual: base-form verbs after determiners or adjectives become nouns
/// 3. entities: runs of name-like tokens are classified with gazetteers
///
/// Headlines written in Title Case carry no capitalization signal, so in that
/// mode only gazetteer words start an entity run.
use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use super::tagger::{EntityKind, Pos, Tagger, Token};

static TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[\p{L}\p{N}]+(?:[-.&][\p{L}\p{N}]+|['’](?:t|re|ve|ll|d|m)\b)*|['’][sS]\b|\S")
        .expect("valid regex")
});

fn set(words: &'static [&'static str]) -> HashSet<&'static str> {
    words.iter().copied().collect()
}

static DETERMINERS: LazyLock<HashSet<&str>> = LazyLock::new(|| {
    set(&[
        "the", "a", "an", "this", "that", "these", "those", "its", "their", "his", "her", "our",
        "my", "your", "some", "any", "every", "each", "no", "all", "both", "another", "several",
        "many", "few", "such", "either", "neither",
    ])
});

static PRONOUNS: LazyLock<HashSet<&str>> = LazyLock::new(|| {
    set(&[
        "i", "you", "he", "she", "it", "we", "they", "me", "him", "us", "them", "who", "whom",
        "someone", "everyone", "anyone", "nobody", "somebody", "everybody", "something",
        "everything", "nothing", "anything", "one", "itself", "themselves", "himself", "herself",
    ])
});

static PREPOSITIONS: LazyLock<HashSet<&str>> = LazyLock::new(|| {
    set(&[
        "in", "on", "at", "by", "for", "with", "from", "to", "of", "over", "under", "after",
        "before", "during", "near", "into", "onto", "across", "against", "amid", "among", "about",
        "around", "through", "without", "within", "despite", "toward", "towards", "via", "per",
        "off", "up", "down", "out", "as", "like", "behind", "beyond", "between", "following",
        "inside", "outside", "above", "below", "along", "upon", "than",
    ])
});

static CONJUNCTIONS: LazyLock<HashSet<&str>> = LazyLock::new(|| {
    set(&[
        "and", "or", "but", "nor", "so", "yet", "because", "while", "although", "though", "if",
        "unless", "whether", "when", "where", "since", "until", "once", "whereas",
    ])
});

static AUXILIARIES: LazyLock<HashSet<&str>> = LazyLock::new(|| {
    set(&[
        "is", "are", "was", "were", "be", "been", "being", "am", "has", "have", "had", "do",
        "does", "did", "will", "would", "can", "could", "shall", "should", "may", "might", "must",
        "won't", "can't", "don't", "doesn't", "didn't", "isn't", "aren't", "wasn't", "weren't",
    ])
});

static PAST_AUXILIARIES: LazyLock<HashSet<&str>> =
    LazyLock::new(|| set(&["was", "were", "had", "did", "been", "wasn't", "weren't", "didn't"]));

static BE_FORMS: LazyLock<HashSet<&str>> =
    LazyLock::new(|| set(&["is", "are", "was", "were", "be", "been", "being", "am"]));

/// Whether `word` is a form of "to be".
pub(crate) fn is_be_form(word: &str) -> bool {
    BE_FORMS.contains(word.to_lowercase().as_str())
}

static ADVERBS: LazyLock<HashSet<&str>> = LazyLock::new(|| {
    set(&[
        "not", "never", "also", "now", "still", "just", "very", "too", "already", "again", "soon",
        "more", "most", "less", "least", "almost", "often", "nearly", "only", "even", "ever",
        "here", "there", "then", "today", "yesterday", "tonight", "tomorrow", "forever", "once",
        "twice", "away", "back", "instead", "perhaps", "maybe", "quite", "rather", "apparently",
        "reportedly", "allegedly", "clumsily",
    ])
});

// Words ending in -ly that are not adverbs.
static NON_ADVERB_LY: LazyLock<HashSet<&str>> = LazyLock::new(|| {
    set(&[
        "family", "early", "italy", "july", "supply", "reply", "apply", "rally", "ally", "belly",
        "jelly", "bully", "assembly", "monopoly", "anomaly", "holly", "lily", "daily", "weekly",
        "monthly", "yearly", "deadly", "elderly", "friendly", "lonely", "lovely", "likely",
        "ugly", "only", "fly", "imply", "comply", "multiply", "rely", "butterfly", "jolly",
        "silly", "chilly", "costly", "orderly", "curly", "burly",
    ])
});

static ADJECTIVES: LazyLock<HashSet<&str>> = LazyLock::new(|| {
    set(&[
        "new", "old", "big", "small", "high", "low", "large", "major", "minor", "local", "global",
        "national", "public", "toxic", "severe", "endangered", "rare", "natural", "human",
        "foreign", "political", "economic", "dead", "young", "top", "key", "huge", "massive",
        "deadly", "record", "extreme", "heavy", "strange", "remote", "illegal", "federal",
        "first", "last", "former", "senior", "chief", "latest", "early", "late", "long", "short",
        "full", "free", "safe", "poor", "rich", "bad", "good", "best", "worst", "ancient",
        "modern", "open", "clean", "clear", "warm", "dry", "cool", "cold", "hot", "fine", "wild",
        "green", "red", "blue", "black", "white", "dark", "bright", "giant", "tiny", "common",
        "daily", "weekly", "likely", "unlikely", "elderly", "lonely", "dangerous", "rising",
        "ongoing", "forever", "nuclear", "marine", "urban", "rural", "polar", "tropical",
        "coastal", "chemical", "financial", "social", "medical", "digital", "critical",
        "official", "royal", "final", "total", "fatal", "crucial", "annual", "rival", "legal",
        "viral", "vital", "mental", "dental", "central", "general", "special", "several",
        "wrong", "right", "real", "sure", "true", "false", "able", "unable", "main", "next",
        "same", "other", "own", "whole", "single", "double", "recent", "current", "previous",
    ])
});

// Verbs listed in base form; regular inflections are recognised from these.
static VERB_BASES: LazyLock<HashSet<&str>> = LazyLock::new(|| {
    set(&[
        "say", "warn", "find", "discover", "detect", "identify", "cause", "lead", "result",
        "report", "reach", "rise", "fall", "decline", "increase", "threaten", "destroy", "damage",
        "kill", "harm", "hit", "strike", "open", "close", "launch", "announce", "claim", "deny",
        "blame", "accuse", "ban", "approve", "reject", "sign", "pass", "vote", "win", "lose",
        "beat", "face", "fight", "seek", "urge", "call", "ask", "tell", "reveal", "show",
        "suggest", "confirm", "admit", "agree", "plan", "promise", "vow", "pledge", "refuse",
        "fail", "try", "need", "want", "help", "save", "protect", "die", "flee", "leave",
        "return", "arrive", "visit", "meet", "join", "quit", "resign", "fire", "hire", "cut",
        "raise", "boost", "slash", "drop", "surge", "soar", "jump", "plunge", "tumble", "crash",
        "collapse", "spark", "trigger", "prompt", "fuel", "spread", "pour", "dump", "release",
        "throw", "create", "make", "put", "take", "give", "get", "go", "come", "see", "know",
        "think", "become", "begin", "bring", "buy", "sell", "build", "send", "spend", "pay",
        "hold", "keep", "let", "run", "stand", "understand", "write", "speak", "break", "choose",
        "drive", "fly", "grow", "eat", "steal", "shoot", "catch", "teach", "feel", "deal",
        "mean", "feed", "sink", "swim", "hang", "dig", "draw", "blow", "shake", "wake", "wear",
        "tear", "hide", "bite", "forget", "freeze", "sit", "lie", "lay", "set", "shut", "split",
        "burst", "cost", "hurt", "emerge", "appear", "happen", "occur", "change", "move",
        "force", "expect", "continue", "remain", "stay", "start", "end", "stop", "block", "halt",
        "delay", "order", "arrest", "charge", "sue", "investigate", "probe", "struggle",
        "suffer", "survive", "recover", "rescue", "evacuate", "flood", "burn", "melt", "poison",
        "pollute", "contaminate", "infect", "link", "connect", "affect", "worsen", "improve",
        "reduce", "limit", "expand", "extend", "host", "celebrate", "mark", "honor", "honour",
        "mourn", "praise", "criticize", "criticise", "slam", "condemn", "defend", "attack",
        "invade", "bomb", "target", "support", "oppose", "push", "pull", "press", "demand",
        "require", "allow", "prevent", "avoid", "miss", "lack", "hope", "fear", "worry",
        "believe", "doubt", "question", "answer", "respond", "react", "explain", "describe",
        "predict", "estimate", "measure", "test", "study", "track", "monitor", "watch", "use",
        "add", "remove", "replace", "receive", "offer", "provide", "produce", "develop",
        "design", "unveil", "introduce", "publish", "post", "share", "broadcast", "list", "rank",
        "lift", "lower", "ease", "tighten", "shrink", "injure", "wound", "explode", "erupt",
        "rock", "batter", "lash", "sweep", "ravage", "devastate", "wreck", "ruin", "endanger",
        "wipe", "leak", "hack", "rob", "loot", "smuggle", "trade", "export", "import", "invest",
        "fund", "finance", "borrow", "lend", "owe", "tax", "defeat", "crush", "clinch", "seal",
        "secure", "grab", "seize", "capture", "jail", "sentence", "convict", "acquit", "indict",
        "plead", "testify", "rule", "overturn", "uphold", "veto", "enact", "adopt", "amend",
        "repeal", "scrap", "axe", "shelve", "postpone", "cancel", "name", "appoint", "elect",
        "nominate", "select", "pick", "oust", "sack", "dismiss", "suspend", "step", "walk",
        "ride", "sail", "land", "board", "climb", "dive", "float", "drift", "drown", "vanish",
        "disappear", "reopen", "lock", "expose", "uncover", "unearth", "drill", "heat", "chill",
        "thaw", "soak", "wash", "spill", "emit", "breathe", "drink", "cook", "serve", "starve",
        "thrive", "bloom", "wither", "decay", "rot", "evolve", "adapt", "mutate", "vaccinate",
        "treat", "cure", "heal", "diagnose", "operate", "donate", "originate", "deploy",
        "calm", "recommend", "hover", "cover", "baffle", "confront", "kidnap", "escape", "mock", "insist", "argue",
    ])
});

static IRREGULAR_PAST: LazyLock<HashSet<&str>> = LazyLock::new(|| {
    set(&[
        "found", "said", "made", "took", "gave", "went", "came", "saw", "told", "left", "held",
        "brought", "thought", "built", "sent", "won", "lost", "paid", "met", "ran", "began",
        "fell", "rose", "struck", "spoke", "stole", "drove", "flew", "grew", "knew", "threw",
        "shot", "sold", "bought", "caught", "taught", "fought", "sought", "kept", "slept",
        "felt", "dealt", "meant", "led", "fled", "fed", "bled", "spent", "lent", "bent", "stood",
        "understood", "wrote", "broke", "chose", "froze", "woke", "wore", "tore", "swore", "hid",
        "slid", "bit", "forgot", "got", "shook", "sank", "sang", "rang", "drank", "swam",
        "stuck", "hung", "dug", "spun", "became", "withdrew", "drew", "blew", "undertook",
        "been", "done", "gone", "seen", "taken", "given", "written", "spoken", "stolen",
        "driven", "flown", "grown", "known", "thrown", "shown", "broken", "chosen", "frozen",
        "fallen", "risen", "beaten", "bitten", "eaten", "forgotten", "gotten", "hidden",
        "shaken", "sworn", "torn", "worn", "woken", "begun", "sunk", "swum", "drunk", "laid",
    ])
});

static REPORTING_VERBS: LazyLock<HashSet<&str>> = LazyLock::new(|| {
    set(&[
        "says", "said", "warns", "warned", "claims", "claimed", "tells", "told", "announces",
        "announced", "admits", "admitted", "denies", "denied", "insists", "insisted", "argues",
        "argued", "reveals", "revealed",
    ])
});

static HONORIFICS: LazyLock<HashSet<&str>> = LazyLock::new(|| {
    set(&[
        "mr", "mrs", "ms", "dr", "president", "prime", "minister", "senator", "sen", "rep",
        "governor", "gov", "mayor", "king", "queen", "prince", "princess", "pope", "judge",
        "chancellor", "general", "gen", "sir", "lady", "lord", "professor", "prof", "ceo",
        "chairman", "chairwoman", "secretary", "officer", "detective", "captain", "coach",
        "dame", "sheriff", "bishop", "rabbi", "imam", "father", "sister", "brother", "uncle",
        "aunt", "grandma", "grandpa",
    ])
});

static GIVEN_NAMES: LazyLock<HashSet<&str>> = LazyLock::new(|| {
    set(&[
        "john", "joe", "donald", "kamala", "elon", "taylor", "mary", "james", "robert",
        "michael", "william", "david", "richard", "joseph", "thomas", "charles", "chris",
        "daniel", "matthew", "mark", "paul", "steven", "andrew", "kevin", "brian", "george",
        "edward", "ronald", "tim", "jason", "jeff", "ryan", "jacob", "gary", "nicholas", "eric",
        "jonathan", "stephen", "larry", "justin", "scott", "brandon", "benjamin", "samuel",
        "frank", "gregory", "raymond", "alexander", "patrick", "jack", "dennis", "jerry",
        "tyler", "aaron", "henry", "adam", "douglas", "nathan", "peter", "kyle", "walter",
        "harold", "jeremy", "ethan", "carl", "keith", "roger", "gerald", "sean", "arthur",
        "noah", "lawrence", "jesse", "bryan", "billy", "albert", "dylan", "bruce", "gabriel",
        "alan", "juan", "logan", "wayne", "ralph", "roy", "eugene", "randy", "vincent",
        "russell", "louis", "philip", "bobby", "johnny", "bradley", "patricia", "jennifer",
        "linda", "elizabeth", "barbara", "susan", "jessica", "sarah", "karen", "nancy", "lisa",
        "betty", "margaret", "sandra", "ashley", "kimberly", "emily", "donna", "michelle",
        "dorothy", "carol", "amanda", "melissa", "deborah", "stephanie", "rebecca", "sharon",
        "laura", "cynthia", "kathleen", "amy", "shirley", "angela", "helen", "anna", "brenda",
        "pamela", "nicole", "emma", "samantha", "katherine", "christine", "rachel", "catherine",
        "carolyn", "janet", "ruth", "maria", "heather", "diane", "julie", "joyce", "victoria",
        "olivia", "kelly", "christina", "lauren", "joan", "evelyn", "judith", "megan",
        "cheryl", "andrea", "hannah", "martha", "jacqueline", "gloria", "ann", "teresa",
        "kathryn", "sara", "janice", "jean", "alice", "abigail", "julia", "judy", "grace",
        "denise", "amber", "marilyn", "beverly", "danielle", "theresa", "sophia", "marie",
        "diana", "natalie", "isabella", "charlotte", "rose", "boris", "vladimir",
        "narendra", "emmanuel", "olaf", "keir", "rishi", "giorgia", "volodymyr", "ursula",
        "greta", "bill", "warren", "sam", "satya", "sundar", "rupert", "oprah", "barack",
        "hillary", "bernie", "mitch", "ron", "gavin", "jerome", "liz",
    ])
});

static FAMOUS_SURNAMES: LazyLock<HashSet<&str>> = LazyLock::new(|| {
    set(&[
        "trump", "biden", "harris", "obama", "putin", "zelensky", "zelenskyy", "musk", "macron",
        "modi", "netanyahu", "sunak", "starmer", "scholz", "trudeau", "bezos", "zuckerberg",
        "gates", "swift", "beyonce", "pelosi", "mcconnell", "desantis", "newsom", "merkel",
        "erdogan", "lula", "milei", "meloni", "sanders", "altman", "buffett", "powell", "yellen",
        "thunberg", "attenborough", "kennedy", "clinton", "bush", "vance", "walz", "xi",
    ])
});

static KNOWN_ORGS: LazyLock<HashSet<&str>> = LazyLock::new(|| {
    set(&[
        "bbc", "nasa", "npr", "reuters", "google", "apple", "microsoft", "amazon", "meta",
        "facebook", "tesla", "openai", "twitter", "netflix", "nvidia", "intel", "samsung",
        "toyota", "boeing", "airbus", "pfizer", "moderna", "un", "nato", "fbi", "cia", "nhs",
        "epa", "imf", "fifa", "uefa", "greenpeace", "unicef", "interpol", "europol", "walmart",
        "disney", "shell", "bp", "exxon", "exxonmobil", "uber", "starbucks", "ap", "cnn", "nbc",
        "abc", "cbs", "fox", "opec", "unesco", "eu", "wwf", "noaa", "cdc", "fda", "ofcom",
        "spacex", "tiktok", "bytedance", "alibaba", "huawei", "sony", "nintendo", "ikea",
        "volkswagen", "bmw", "ford", "youtube", "instagram", "whatsapp", "anthropic", "x",
    ])
});

static ORG_PHRASES: LazyLock<HashSet<&str>> = LazyLock::new(|| {
    set(&[
        "european union", "united nations", "world health organization", "white house",
        "red cross", "world bank", "federal reserve", "associated press", "new york times",
        "washington post", "wall street journal", "supreme court", "premier league",
        "world trade organization", "pentagon", "kremlin", "downing street",
    ])
});

static ORG_SUFFIXES: LazyLock<HashSet<&str>> = LazyLock::new(|| {
    set(&[
        "university", "ministry", "council", "department", "agency", "committee", "party",
        "bank", "association", "institute", "commission", "corporation", "corp", "inc", "ltd",
        "llc", "plc", "company", "co", "group", "foundation", "court", "parliament", "congress",
        "senate", "police", "authority", "office", "service", "board", "society", "union",
        "federation", "league", "network", "labs", "airlines", "times", "post", "news",
        "reserve", "fund", "trust", "church", "school", "college", "hospital", "club",
        "organization", "organisation", "administration", "bureau", "army", "navy",
    ])
});

static PLACES: LazyLock<HashSet<&str>> = LazyLock::new(|| {
    set(&[
        // countries
        "afghanistan", "argentina", "australia", "austria", "bangladesh", "belgium", "brazil",
        "canada", "chile", "china", "colombia", "cuba", "denmark", "egypt", "england",
        "ethiopia", "finland", "france", "germany", "ghana", "greece", "haiti", "hungary",
        "iceland", "india", "indonesia", "iran", "iraq", "ireland", "israel", "italy", "japan",
        "kenya", "lebanon", "libya", "madagascar", "malaysia", "mexico", "morocco", "nepal",
        "netherlands", "nigeria", "norway", "pakistan", "peru", "philippines", "poland",
        "portugal", "qatar", "romania", "russia", "scotland", "singapore", "somalia", "spain",
        "sudan", "sweden", "switzerland", "syria", "taiwan", "thailand", "turkey", "ukraine",
        "venezuela", "vietnam", "wales", "yemen", "zimbabwe", "gaza", "palestine",
        "united states", "united kingdom", "south africa", "new zealand", "saudi arabia",
        "north korea", "south korea", "sri lanka", "us", "uk", "usa", "uae", "america",
        "britain", "great britain",
        // regions
        "europe", "asia", "africa", "antarctica", "arctic", "oceania", "middle east",
        "amazon rainforest", "great barrier reef", "sahara", "himalayas", "alps", "siberia",
        "scandinavia", "caribbean", "pacific", "atlantic", "mediterranean",
        // us states
        "alabama", "alaska", "arizona", "arkansas", "california", "colorado", "connecticut",
        "delaware", "florida", "georgia", "hawaii", "idaho", "illinois", "indiana", "iowa",
        "kansas", "kentucky", "louisiana", "maine", "maryland", "massachusetts", "michigan",
        "minnesota", "mississippi", "missouri", "montana", "nebraska", "nevada",
        "new hampshire", "new jersey", "new mexico", "north carolina", "north dakota", "ohio",
        "oklahoma", "oregon", "pennsylvania", "rhode island", "south carolina", "south dakota",
        "tennessee", "texas", "utah", "vermont", "virginia", "west virginia", "wisconsin",
        "wyoming",
        // cities
        "london", "paris", "berlin", "madrid", "rome", "moscow", "kyiv", "kiev", "beijing",
        "shanghai", "tokyo", "delhi", "mumbai", "sydney", "melbourne", "toronto", "vancouver",
        "chicago", "boston", "seattle", "houston", "dallas", "miami", "atlanta", "detroit",
        "denver", "phoenix", "washington", "new york", "los angeles", "san francisco",
        "las vegas", "new orleans", "hong kong", "cairo", "istanbul", "dubai", "lagos",
        "nairobi", "jerusalem", "tehran", "baghdad", "kabul", "manila", "jakarta", "bangkok",
        "seoul", "singapore", "amsterdam", "brussels", "vienna", "dublin", "edinburgh",
        "glasgow", "manchester", "liverpool", "birmingham", "lisbon", "athens", "stockholm",
        "oslo", "copenhagen", "helsinki", "warsaw", "prague", "budapest", "geneva", "zurich",
        "mexico city", "rio", "sao paulo", "buenos aires", "lima", "bogota", "havana",
        "montreal", "ottawa", "brooklyn", "manhattan", "hollywood", "silicon valley",
    ])
});

static PLACE_SUFFIXES: LazyLock<HashSet<&str>> = LazyLock::new(|| {
    set(&[
        "city", "county", "river", "island", "islands", "mountains", "mountain", "valley",
        "lake", "sea", "ocean", "bay", "coast", "province", "region", "regions", "state",
        "street", "beach", "desert", "forest", "canyon", "gulf", "peninsula", "strait",
        "harbor", "harbour", "district", "village", "town",
    ])
});

static PLACE_PREFIXES: LazyLock<HashSet<&str>> =
    LazyLock::new(|| set(&["st", "saint", "mt", "mount", "fort", "port", "lake", "cape"]));

static NAME_CONNECTORS: LazyLock<HashSet<&str>> = LazyLock::new(|| {
    set(&["of", "&", "for", "the", "de", "la", "von", "van", "del", "da", "du", "bin", "al"])
});

// Tokens before a full stop that do not end a sentence.
static ABBREVIATIONS: LazyLock<HashSet<&str>> = LazyLock::new(|| {
    set(&[
        "mr", "mrs", "ms", "dr", "st", "jr", "sr", "prof", "gen", "sen", "rep", "gov", "u.s",
        "u.k", "u.n", "inc", "corp", "ltd", "co", "vs", "etc", "no", "mt", "ft", "jan", "feb",
        "aug", "sept", "oct", "nov", "dec",
    ])
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum VerbForm {
    Base,
    ThirdPerson,
    Past,
    Gerund,
}

/// Default [`Tagger`]: deterministic, table-driven, English only.
#[derive(Debug, Clone, Copy, Default)]
pub struct LexiconTagger;

impl LexiconTagger {
    pub fn new() -> Self {
        Self
    }
}

impl Tagger for LexiconTagger {
    fn tag(&self, text: &str) -> Vec<Token> {
        let mut tokens = tokenize(text);
        if tokens.is_empty() {
            return tokens;
        }

        let casing = Casing::detect(&tokens);
        let mut forms: Vec<Option<VerbForm>> = Vec::with_capacity(tokens.len());
        for i in 0..tokens.len() {
            let (pos, past, form) = lexical(&tokens, i, casing);
            tokens[i].pos = pos;
            tokens[i].past = past;
            forms.push(form);
        }

        disambiguate(&mut tokens, &forms);
        tag_entities(&mut tokens, casing);
        tokens
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Casing {
    Sentence,
    /// Title Case or ALL CAPS: capitalization says nothing about names.
    Title,
}

impl Casing {
    fn detect(tokens: &[Token]) -> Self {
        let long_words: Vec<&Token> = tokens
            .iter()
            .filter(|t| t.text.chars().count() >= 4 && starts_alphabetic(&t.text))
            .collect();
        if long_words.len() < 3 {
            return Casing::Sentence;
        }
        let capitalized = long_words.iter().filter(|t| is_capitalized(&t.text)).count();
        if capitalized * 10 >= long_words.len() * 9 {
            Casing::Title
        } else {
            Casing::Sentence
        }
    }
}

fn tokenize(text: &str) -> Vec<Token> {
    let mut tokens: Vec<Token> = Vec::new();
    let mut sentence = 0;
    let mut pending_break = false;

    for m in TOKEN_RE.find_iter(text) {
        if pending_break {
            sentence += 1;
            pending_break = false;
        }
        let word = m.as_str();
        if word == "." {
            // "Dr.", "U.S.", "J.": the period belongs to the word and ends nothing.
            let abbreviation = tokens
                .last_mut()
                .filter(|prev| prev.end == m.start() && is_abbreviation(&prev.text));
            if let Some(prev) = abbreviation {
                prev.text.push('.');
                prev.end = m.end();
                continue;
            }
        }
        if matches!(word, "." | "!" | "?") {
            pending_break = true;
        }
        tokens.push(Token {
            text: word.to_string(),
            start: m.start(),
            end: m.end(),
            sentence,
            pos: Pos::Punctuation,
            past: false,
            entity: None,
        });
    }
    tokens
}

fn is_abbreviation(word: &str) -> bool {
    ABBREVIATIONS.contains(word.to_lowercase().as_str())
        || (word.chars().count() == 1 && is_capitalized(word))
}

/// Lower-cased lookup form. Abbreviations lose their periods, so "U.S." is "us".
fn lookup_key(word: &str) -> String {
    let lower = word.to_lowercase();
    if lower.ends_with('.') {
        lower.replace('.', "")
    } else {
        lower
    }
}

fn starts_alphabetic(word: &str) -> bool {
    word.chars().next().is_some_and(char::is_alphabetic)
}

fn is_capitalized(word: &str) -> bool {
    word.chars().next().is_some_and(char::is_uppercase)
}

fn is_acronym(word: &str) -> bool {
    let letters: Vec<char> = word.chars().filter(|c| c.is_alphabetic()).collect();
    letters.len() >= 2 && letters.iter().all(|c| c.is_uppercase())
}

fn is_sentence_initial(tokens: &[Token], i: usize) -> bool {
    tokens[..i]
        .iter()
        .rev()
        .take_while(|t| t.sentence == tokens[i].sentence)
        .all(|t| !t.is_word())
}

fn lexical(tokens: &[Token], i: usize, casing: Casing) -> (Pos, bool, Option<VerbForm>) {
    let word = tokens[i].text.as_str();
    let lower = lookup_key(word);
    let lower = lower.as_str();

    if !word.chars().any(char::is_alphanumeric) {
        return (Pos::Punctuation, false, None);
    }
    if word.chars().next().is_some_and(|c| c.is_ascii_digit()) {
        return (Pos::Number, false, None);
    }
    if lower == "'s" || lower == "’s" {
        return (Pos::Particle, false, None);
    }
    // "US", "WHO": acronyms outside an all-caps headline are names, not function words.
    if casing == Casing::Sentence && is_acronym(word) {
        return (Pos::ProperNoun, false, None);
    }
    if DETERMINERS.contains(lower) {
        return (Pos::Determiner, false, None);
    }
    if PRONOUNS.contains(lower) {
        return (Pos::Pronoun, false, None);
    }
    if AUXILIARIES.contains(lower) {
        return (Pos::Auxiliary, PAST_AUXILIARIES.contains(lower), None);
    }
    if PREPOSITIONS.contains(lower) {
        return (Pos::Preposition, false, None);
    }
    if CONJUNCTIONS.contains(lower) {
        return (Pos::Conjunction, false, None);
    }
    if ADVERBS.contains(lower)
        || (lower.ends_with("ly") && lower.len() > 4 && !NON_ADVERB_LY.contains(lower))
    {
        return (Pos::Adverb, false, None);
    }
    if ADJECTIVES.contains(lower) {
        return (Pos::Adjective, false, None);
    }
    if let Some(form) = verb_form(lower) {
        return (Pos::Verb, form == VerbForm::Past, Some(form));
    }
    if has_adjective_suffix(lower) {
        return (Pos::Adjective, false, None);
    }

    let proper = casing == Casing::Sentence
        && is_capitalized(word)
        && !is_sentence_initial(tokens, i);
    if proper {
        (Pos::ProperNoun, false, None)
    } else {
        (Pos::Noun, false, None)
    }
}

fn has_adjective_suffix(lower: &str) -> bool {
    lower.len() > 5
        && ["ous", "ful", "ive", "able", "ible", "ical", "less"]
            .iter()
            .any(|suffix| lower.ends_with(suffix))
}

fn verb_form(lower: &str) -> Option<VerbForm> {
    if IRREGULAR_PAST.contains(lower) {
        return Some(VerbForm::Past);
    }
    if VERB_BASES.contains(lower) {
        return Some(VerbForm::Base);
    }

    if let Some(stem) = lower.strip_suffix("ing") {
        let mut candidates = vec![stem.to_string(), format!("{stem}e")];
        if let Some(single) = undouble(stem) {
            candidates.push(single);
        }
        // dying -> die, lying -> lie
        if let Some(root) = stem.strip_suffix('y') {
            candidates.push(format!("{root}ie"));
        }
        if candidates.iter().any(|c| is_verb_base(c)) {
            return Some(VerbForm::Gerund);
        }
    }

    if let Some(stem) = lower.strip_suffix("ied") {
        if is_verb_base(&format!("{stem}y")) {
            return Some(VerbForm::Past);
        }
    }
    if let Some(stem) = lower.strip_suffix("ed") {
        let mut candidates = vec![stem.to_string(), format!("{stem}e")];
        if let Some(single) = undouble(stem) {
            candidates.push(single);
        }
        if candidates.iter().any(|c| is_verb_base(c)) {
            return Some(VerbForm::Past);
        }
    }

    if let Some(stem) = lower.strip_suffix("ies") {
        if is_verb_base(&format!("{stem}y")) {
            return Some(VerbForm::ThirdPerson);
        }
    }
    if let Some(stem) = lower.strip_suffix("es") {
        if is_verb_base(stem) {
            return Some(VerbForm::ThirdPerson);
        }
    }
    if let Some(stem) = lower.strip_suffix('s') {
        if is_verb_base(stem) {
            return Some(VerbForm::ThirdPerson);
        }
    }
    None
}

fn is_verb_base(stem: &str) -> bool {
    VERB_BASES.contains(stem)
}

/// "stopp" -> "stop", "plann" -> "plan".
fn undouble(stem: &str) -> Option<String> {
    let mut chars = stem.chars().rev();
    let last = chars.next()?;
    let before = chars.next()?;
    if last == before && !matches!(last, 'a' | 'e' | 'i' | 'o' | 'u' | 's' | 'l') {
        Some(stem[..stem.len() - last.len_utf8()].to_string())
    } else {
        None
    }
}

fn same_sentence<'a>(tokens: &'a [Token], i: usize, j: Option<usize>) -> Option<&'a Token> {
    let j = j?;
    tokens
        .get(j)
        .filter(|t| t.sentence == tokens[i].sentence)
}

fn disambiguate(tokens: &mut [Token], forms: &[Option<VerbForm>]) {
    for i in 0..tokens.len() {
        let Some(form) = forms[i] else {
            continue;
        };
        if tokens[i].pos != Pos::Verb {
            continue;
        }

        let prev = same_sentence(tokens, i, i.checked_sub(1)).map(|t| (t.pos, t.text.clone()));
        let next_is_verb = same_sentence(tokens, i, Some(i + 1)).is_some_and(Token::is_verb);
        let prev_pos = prev.as_ref().map(|(pos, _)| *pos);
        let after_modifier = matches!(
            prev_pos,
            Some(Pos::Determiner | Pos::Adjective | Pos::Particle | Pos::Preposition | Pos::Number)
        );

        let retag = match form {
            VerbForm::Base | VerbForm::ThirdPerson if after_modifier => Some(Pos::Noun),
            // "Reports suggest ...": a sentence rarely opens on a finite verb.
            VerbForm::ThirdPerson if prev.is_none() => Some(Pos::Noun),
            // "Climate change causes ...": a compound noun head.
            VerbForm::Base
                if next_is_verb
                    && matches!(
                        &prev,
                        Some((Pos::Noun, text)) if !text.to_lowercase().ends_with('s')
                    ) =>
            {
                Some(Pos::Noun)
            }
            VerbForm::Gerund
                if matches!(prev_pos, Some(Pos::Determiner | Pos::Particle)) =>
            {
                Some(Pos::Noun)
            }
            VerbForm::Past if matches!(prev_pos, Some(Pos::Determiner | Pos::Particle)) => {
                Some(Pos::Adjective)
            }
            _ => None,
        };

        if let Some(pos) = retag {
            tokens[i].pos = pos;
            tokens[i].past = false;
        }
    }
}

fn is_gazetteer_word(lower: &str) -> bool {
    GIVEN_NAMES.contains(lower)
        || FAMOUS_SURNAMES.contains(lower)
        || HONORIFICS.contains(lower)
        || KNOWN_ORGS.contains(lower)
        || ORG_SUFFIXES.contains(lower)
        || PLACES.contains(lower)
        || PLACE_SUFFIXES.contains(lower)
        || ORG_PHRASES.iter().any(|p| p.split(' ').next() == Some(lower))
        || PLACES.iter().any(|p| p.contains(' ') && p.split(' ').next() == Some(lower))
}

fn is_name_like(tokens: &[Token], i: usize, casing: Casing) -> bool {
    let token = &tokens[i];
    if !starts_alphabetic(&token.text) || !is_capitalized(&token.text) {
        return false;
    }
    let lower = lookup_key(&token.text);
    if casing == Casing::Sentence && is_acronym(&token.text) {
        return true;
    }
    if is_gazetteer_word(&lower) {
        return true;
    }
    if casing == Casing::Title {
        return false;
    }
    matches!(token.pos, Pos::Noun | Pos::ProperNoun)
}

fn tag_entities(tokens: &mut [Token], casing: Casing) {
    let mut i = 0;
    while i < tokens.len() {
        if !is_name_like(tokens, i, casing) {
            i += 1;
            continue;
        }

        let start = i;
        let mut end = i + 1;
        while end < tokens.len() && tokens[end].sentence == tokens[start].sentence {
            if is_name_like(tokens, end, casing) {
                end += 1;
                continue;
            }
            let connector = NAME_CONNECTORS.contains(tokens[end].lower().as_str())
                && end + 1 < tokens.len()
                && tokens[end + 1].sentence == tokens[start].sentence
                && is_name_like(tokens, end + 1, casing);
            if connector {
                end += 2;
            } else {
                break;
            }
        }

        if let Some(kind) = classify_run(tokens, start, end, casing) {
            for token in &mut tokens[start..end] {
                token.entity = Some(kind);
                if !NAME_CONNECTORS.contains(token.lower().as_str()) {
                    token.pos = Pos::ProperNoun;
                    token.past = false;
                }
            }
        }
        i = end;
    }
}

fn classify_run(tokens: &[Token], start: usize, end: usize, casing: Casing) -> Option<EntityKind> {
    let run = &tokens[start..end];
    let words: Vec<String> = run.iter().map(|t| lookup_key(&t.text)).collect();
    let joined = words.join(" ");
    let first = words.first()?.as_str();
    let last = words.last()?.as_str();

    if words.iter().any(|w| ORG_SUFFIXES.contains(w.as_str())) && !PLACES.contains(joined.as_str())
    {
        return Some(EntityKind::Organization);
    }
    if ORG_PHRASES.contains(joined.as_str()) || words.iter().any(|w| KNOWN_ORGS.contains(w.as_str()))
    {
        // A lone "US"/"UK" is a place even though it is an acronym.
        if !PLACES.contains(joined.as_str()) {
            return Some(EntityKind::Organization);
        }
    }
    // "St. Louis", "Fort Worth"
    if run.len() > 1 && PLACE_PREFIXES.contains(first) {
        return Some(EntityKind::Place);
    }
    if HONORIFICS.contains(first) && (run.len() > 1 || casing == Casing::Sentence) {
        return Some(EntityKind::Person);
    }
    if words.iter().any(|w| FAMOUS_SURNAMES.contains(w.as_str())) {
        return Some(EntityKind::Person);
    }
    if GIVEN_NAMES.contains(first) && (run.len() > 1 || casing == Casing::Sentence) {
        return Some(EntityKind::Person);
    }
    if PLACES.contains(joined.as_str())
        || words.iter().any(|w| PLACES.contains(w.as_str()))
        || (run.len() > 1 && PLACE_SUFFIXES.contains(last))
    {
        return Some(EntityKind::Place);
    }
    if run.len() == 1 && casing == Casing::Sentence && is_acronym(&run[0].text) {
        return Some(EntityKind::Organization);
    }
    let followed_by_reporting_verb = tokens
        .get(end)
        .is_some_and(|t| REPORTING_VERBS.contains(t.lower().as_str()));
    if run.len() > 1 && followed_by_reporting_verb {
        return Some(EntityKind::Person);
    }
    None
}
