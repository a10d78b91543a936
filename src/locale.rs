//! Localized UI copy, keyed by language code with an explicit fallback
//! chain: exact code → primary subtag → English. Replaces the original
//! product's scattered per-render string switches with one resource map.

/// The pieces of fixed copy the core emits (greetings and notices).
/// Turn responses themselves are composed in the pivot language and
/// translated at the orchestrator boundary — they are not resources.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiCopy {
    Greeting,
    Disclaimer,
    CompletionUnavailable,
    SpeechUnavailable,
    LanguageSuggestion,
}

/// Resolve copy for a language tag, falling back along
/// `lang` → primary subtag → `en`.
pub fn ui_copy(lang: &str, key: UiCopy) -> &'static str {
    if let Some(text) = lookup(lang, key) {
        return text;
    }
    if let Some(primary) = lang.split('-').next() {
        if primary != lang {
            if let Some(text) = lookup(primary, key) {
                return text;
            }
        }
    }
    english(key)
}

fn lookup(lang: &str, key: UiCopy) -> Option<&'static str> {
    use UiCopy::*;
    let text = match (lang, key) {
        ("en", _) => english(key),

        ("es", Greeting) => "¡Hola! Soy tu asistente médico de IA. ¿Cómo puedo ayudarte hoy?",
        ("es", Disclaimer) => "Este asistente de IA proporciona solo información general y no sustituye el consejo, diagnóstico o tratamiento médico profesional.",
        ("es", CompletionUnavailable) => "Lo siento, ocurrió un error al procesar tu pregunta. Por favor, inténtalo de nuevo.",
        ("es", SpeechUnavailable) => "Las funciones de voz no están disponibles en este entorno.",
        ("es", LanguageSuggestion) => "Parece que escribes en otro idioma. ¿Quieres cambiarlo?",

        ("fr", Greeting) => "Bonjour ! Je suis votre assistant médical IA. Comment puis-je vous aider aujourd'hui ?",
        ("fr", Disclaimer) => "Cet assistant IA fournit uniquement des informations générales et ne remplace pas un avis, un diagnostic ou un traitement médical professionnel.",
        ("fr", CompletionUnavailable) => "Désolé, une erreur s'est produite lors du traitement de votre question. Veuillez réessayer.",
        ("fr", SpeechUnavailable) => "Les fonctions vocales ne sont pas disponibles dans cet environnement.",
        ("fr", LanguageSuggestion) => "Il semble que vous écriviez dans une autre langue. Voulez-vous changer ?",

        ("de", Greeting) => "Hallo! Ich bin Ihr KI-Gesundheitsassistent. Wie kann ich Ihnen heute helfen?",
        ("de", Disclaimer) => "Dieser KI-Assistent liefert nur allgemeine Informationen und ersetzt keine professionelle medizinische Beratung, Diagnose oder Behandlung.",
        ("de", CompletionUnavailable) => "Entschuldigung, bei der Verarbeitung Ihrer Frage ist ein Fehler aufgetreten. Bitte versuchen Sie es erneut.",
        ("de", SpeechUnavailable) => "Sprachfunktionen sind in dieser Umgebung nicht verfügbar.",
        ("de", LanguageSuggestion) => "Sie scheinen in einer anderen Sprache zu schreiben. Möchten Sie wechseln?",

        ("pt", Greeting) => "Olá! Sou seu assistente médico de IA. Como posso ajudar hoje?",
        ("pt", Disclaimer) => "Este assistente de IA fornece apenas informações gerais e não substitui aconselhamento, diagnóstico ou tratamento médico profissional.",
        ("pt", CompletionUnavailable) => "Desculpe, ocorreu um erro ao processar sua pergunta. Por favor, tente novamente.",
        ("pt", SpeechUnavailable) => "Os recursos de voz não estão disponíveis neste ambiente.",
        ("pt", LanguageSuggestion) => "Parece que você está escrevendo em outro idioma. Deseja mudar?",

        ("hi", Greeting) => "नमस्ते! मैं आपका एआई चिकित्सा सहायक हूं। आज मैं आपकी कैसे मदद कर सकता हूं?",
        ("hi", Disclaimer) => "यह एआई सहायक केवल सामान्य जानकारी देता है और पेशेवर चिकित्सा सलाह, निदान या उपचार का विकल्प नहीं है।",
        ("hi", CompletionUnavailable) => "क्षमा करें, आपके प्रश्न को संसाधित करने में त्रुटि हुई। कृपया पुनः प्रयास करें।",
        ("hi", SpeechUnavailable) => "इस वातावरण में वॉयस सुविधाएं उपलब्ध नहीं हैं।",
        ("hi", LanguageSuggestion) => "लगता है आप किसी अन्य भाषा में लिख रहे हैं। क्या आप बदलना चाहेंगे?",

        ("zh", Greeting) => "你好！我是你的AI医疗助手。今天我能帮你什么？",
        ("zh", Disclaimer) => "此AI助手仅提供一般信息，不能替代专业医疗建议、诊断或治疗。",
        ("zh", CompletionUnavailable) => "抱歉，处理您的问题时出错了。请再试一次。",
        ("zh", SpeechUnavailable) => "语音功能在此环境中不可用。",
        ("zh", LanguageSuggestion) => "您似乎在用另一种语言书写。要切换吗？",

        _ => return None,
    };
    Some(text)
}

fn english(key: UiCopy) -> &'static str {
    match key {
        UiCopy::Greeting => "Hello! I'm your AI medical assistant. How can I help you today?",
        UiCopy::Disclaimer => {
            "This AI assistant provides general information only and is not a substitute \
             for professional medical advice, diagnosis, or treatment."
        }
        UiCopy::CompletionUnavailable => {
            "I'm sorry, I encountered an error processing your question. Please try again."
        }
        UiCopy::SpeechUnavailable => "Voice features are not available in this environment.",
        UiCopy::LanguageSuggestion => {
            "It looks like you're writing in a different language. Would you like to switch?"
        }
    }
}
