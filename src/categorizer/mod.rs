//! Keyword-scoring heuristic that maps a free-text transaction description
//! to the best-matching category name.

use std::collections::HashSet;

use serde::Serialize;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// One category with its matching keywords. Keywords are pre-folded
/// (lowercase, no diacritics); some intentionally carry spaces so they only
/// match as phrases or word prefixes (e.g. `"dia "`, `"br "`).
pub struct CategoryRule {
    pub category: &'static str,
    pub keywords: &'static [&'static str],
}

/// Rule table for common Brazilian transactions. Declaration order is the
/// deterministic tie-break for equal scores, so this must stay an ordered
/// slice, never a map.
pub static RULES: &[CategoryRule] = &[
    CategoryRule {
        category: "Transporte",
        keywords: &["uber", "99", "cabify", "estacionamento", "pedagio", "sem parar"],
    },
    CategoryRule {
        category: "Delivery",
        keywords: &["ifood", "rappi", "uber eats", "delivery"],
    },
    CategoryRule {
        category: "Supermercado",
        keywords: &[
            "mercado livre",
            "carrefour",
            "extra",
            "paodeacucar",
            "pao de acucar",
            "assai",
            "atacadao",
            "dia ",
            "guanabara",
        ],
    },
    CategoryRule {
        category: "Compras",
        keywords: &[
            "amazon",
            "magazine luiza",
            "magazineluiza",
            "americanas",
            "submarino",
            "casas bahia",
            "shopee",
            "shein",
            "aliexpress",
        ],
    },
    CategoryRule {
        category: "Assinaturas",
        keywords: &[
            "netflix",
            "spotify",
            "prime video",
            "disney+",
            "hbo max",
            "youtube premium",
            "globoplay",
            "deezer",
            "icloud",
            "google drive",
            "office 365",
            "microsoft 365",
        ],
    },
    CategoryRule {
        category: "Telefone/Internet",
        keywords: &["vivo", "claro", "tim", "oi", "internet", "banda larga"],
    },
    CategoryRule {
        category: "Energia",
        keywords: &["enel", "light", "copel", "ceee", "cpfl", "energisa", "celesc"],
    },
    CategoryRule {
        category: "Agua",
        keywords: &["sabesp", "copasa", "sanepar", "caesb", "saae", "casan"],
    },
    CategoryRule {
        category: "Condominio",
        keywords: &["condominio"],
    },
    CategoryRule {
        category: "Aluguel",
        keywords: &["aluguel", "locacao"],
    },
    CategoryRule {
        category: "Impostos",
        keywords: &["iptu", "ipva", "irpf", "darf", "taxa"],
    },
    CategoryRule {
        category: "Seguro",
        keywords: &["seguro", "porto seguro", "sulamerica", "bradesco seguros", "allianz"],
    },
    CategoryRule {
        category: "Saude",
        keywords: &[
            "farmacia",
            "drogasil",
            "droga raia",
            "pague menos",
            "panvel",
            "ultrafarma",
            "laboratorio",
            "consulta",
            "hospital",
            "clinica",
        ],
    },
    CategoryRule {
        category: "Combustivel",
        keywords: &[
            "posto",
            "shell",
            "ipiranga",
            "br ",
            "petrobras",
            "gasolina",
            "etanol",
            "diesel",
        ],
    },
    CategoryRule {
        category: "Academia",
        keywords: &["academia", "smart fit", "bodytech", "bluefit"],
    },
    CategoryRule {
        category: "Educacao",
        keywords: &[
            "escola",
            "curso",
            "udemy",
            "alura",
            "coursera",
            "faculdade",
            "universidade",
        ],
    },
    CategoryRule {
        category: "Alimentacao",
        keywords: &["restaurante", "lanchonete", "bar", "cafeteria", "padaria"],
    },
    CategoryRule {
        category: "Tarifas Bancarias",
        keywords: &[
            "tarifa",
            "cesta",
            "manutencao de conta",
            "iof",
            "ted",
            "doc",
            "pix tarifa",
            "bancaria",
        ],
    },
    CategoryRule {
        category: "Investimentos",
        keywords: &[
            "investimento",
            "tesouro",
            "cdb",
            "lci",
            "lca",
            "acoes",
            "fundos",
            "renda fixa",
        ],
    },
    CategoryRule {
        category: "Renda: Salario",
        keywords: &["salario", "pagamento", "provento", "holerite"],
    },
    CategoryRule {
        category: "Renda: Transferencias",
        keywords: &["pix recebido", "transferencia recebida", "deposito"],
    },
];

const MIN_SCORE: f64 = 1.5;
const SUBSTRING_WEIGHT: f64 = 10.0;
const EXACT_TOKEN_BONUS: f64 = 2.0;
const CATEGORY_BASE_WEIGHT: f64 = 1.0;

/// NFKD-decomposes the text, strips combining marks and lowercases, so
/// `"Condomínio"` matches the folded keyword `"condominio"`.
fn normalize(text: &str) -> String {
    text.nfkd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
}

fn tokenize(text: &str) -> Vec<&str> {
    text.split(|c| c == '/' || c == '-' || char::is_whitespace(c))
        .filter(|t| !t.is_empty())
        .collect()
}

/// Returns the best matching category for the description, if any.
///
/// Every keyword found as a substring contributes proportionally to its
/// length; an exact whole-token match earns a flat bonus; categories with
/// any evidence receive a base weight. Scores below a modest floor yield no
/// suggestion. Ties resolve to the first rule in table order.
pub fn suggest(description: &str) -> Option<&'static str> {
    let text = normalize(description);
    if text.is_empty() {
        return None;
    }
    let tokens: HashSet<&str> = tokenize(&text).into_iter().collect();
    let total_len = text.chars().count().max(1) as f64;

    let mut best_category = None;
    let mut best_score = 0.0f64;
    for rule in RULES {
        let mut score = 0.0f64;
        for kw in rule.keywords {
            if text.contains(kw) {
                // Longer keywords weigh more.
                score += (kw.chars().count() as f64 / total_len) * SUBSTRING_WEIGHT;
                if tokens.contains(kw) {
                    score += EXACT_TOKEN_BONUS;
                }
            }
        }
        if score > 0.0 {
            score += CATEGORY_BASE_WEIGHT;
        }
        if score > best_score {
            best_score = score;
            best_category = Some(rule.category);
        }
    }

    if best_score < MIN_SCORE {
        return None;
    }
    best_category
}

/// A suggestion with the keyword that triggered it, for explainability.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Suggestion {
    pub category: &'static str,
    pub matched_keyword: &'static str,
}

/// Returns the category whose longest keyword appears in the description,
/// together with that keyword. Independent of [`suggest`]'s scoring: the
/// proxy here is keyword length plus a token-exactness bonus, and it is
/// never exposed to the caller. Ties resolve to the first rule in table
/// order.
pub fn explain(description: &str) -> Option<Suggestion> {
    let text = normalize(description);
    if text.is_empty() {
        return None;
    }
    let tokens: HashSet<&str> = tokenize(&text).into_iter().collect();

    let mut best: Option<(Suggestion, usize)> = None;
    for rule in RULES {
        for kw in rule.keywords {
            if text.contains(kw) {
                let mut proxy = kw.chars().count();
                if tokens.contains(kw) {
                    proxy += 5;
                }
                if best.as_ref().map_or(true, |(_, b)| proxy > *b) {
                    best = Some((
                        Suggestion {
                            category: rule.category,
                            matched_keyword: kw,
                        },
                        proxy,
                    ));
                }
            }
        }
    }
    best.map(|(suggestion, _)| suggestion)
}
