// ============================================================================
// Contenu statique de la page vitrine
// ============================================================================
// Tout le texte du site du cabinet : chiffres clés, services, tarifs, avis,
// contacts. Aucune donnée dynamique ici.
//
// CONCEPT RUST : données 'static
// - &'static str : texte compilé dans le binaire, jamais alloué
// - const &[T] : tableau constant, utilisable partout sans copie
// ============================================================================

/// Sections de la page, dans l'ordre d'affichage
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Section {
    #[default]
    Home,
    About,
    Services,
    Formats,
    Pricing,
    Reviews,
    Booking,
    Contacts,
}

/// Nombre de sections de la page
pub const SECTION_COUNT: usize = 8;

impl Section {
    pub const ALL: [Section; SECTION_COUNT] = [
        Section::Home,
        Section::About,
        Section::Services,
        Section::Formats,
        Section::Pricing,
        Section::Reviews,
        Section::Booking,
        Section::Contacts,
    ];

    /// Titre affiché dans la barre de navigation
    pub fn title(&self) -> &'static str {
        match self {
            Section::Home => "Главная",
            Section::About => "Обо мне",
            Section::Services => "Услуги",
            Section::Formats => "Консультации",
            Section::Pricing => "Цены",
            Section::Reviews => "Отзывы",
            Section::Booking => "Запись",
            Section::Contacts => "Контакты",
        }
    }

    /// Position dans ALL
    pub fn index(&self) -> usize {
        Section::ALL
            .iter()
            .position(|section| section == self)
            .unwrap_or(0)
    }

    /// Section depuis un chiffre 1..=8 (raccourci clavier)
    pub fn from_digit(digit: u32) -> Option<Self> {
        let index = (digit as usize).checked_sub(1)?;
        Section::ALL.get(index).copied()
    }

    /// Section suivante, bloquée en bas de page
    pub fn next(&self) -> Self {
        Section::ALL
            .get(self.index() + 1)
            .copied()
            .unwrap_or(Section::Contacts)
    }

    /// Section précédente, bloquée en haut de page
    pub fn previous(&self) -> Self {
        Section::ALL[self.index().saturating_sub(1)]
    }
}

// ============================================================================
// Structures de contenu
// ============================================================================

#[derive(Debug, Clone, Copy)]
pub struct Stat {
    pub label: &'static str,
    pub value: &'static str,
}

#[derive(Debug, Clone, Copy)]
pub struct Credential {
    pub title: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone, Copy)]
pub struct Service {
    pub title: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone, Copy)]
pub struct ConsultationFormat {
    pub title: &'static str,
    pub description: &'static str,
    pub highlights: [&'static str; 3],
}

#[derive(Debug, Clone, Copy)]
pub struct PricePlan {
    pub title: &'static str,
    pub price: &'static str,
    pub duration: &'static str,
    pub features: [&'static str; 3],
    /// Formule mise en avant ("Популярное")
    pub featured: bool,
}

#[derive(Debug, Clone, Copy)]
pub struct Testimonial {
    pub name: &'static str,
    pub text: &'static str,
    pub rating: u8,
}

#[derive(Debug, Clone, Copy)]
pub struct ContactLine {
    pub label: &'static str,
    pub value: &'static str,
}

#[derive(Debug, Clone, Copy)]
pub struct OpeningHours {
    pub days: &'static str,
    pub hours: &'static str,
}

// ============================================================================
// Contenu
// ============================================================================

pub const BRAND: &str = "Психолог";

pub const HERO_TITLE: &str = "Путь к гармонии начинается здесь";

pub const HERO_TEXT: &str = "Профессиональная психологическая поддержка онлайн и в Москве. \
Помогу найти ответы на важные вопросы и обрести внутреннее равновесие.";

pub const STATS: &[Stat] = &[
    Stat { label: "Поддержка", value: "24/7" },
    Stat { label: "Клиентов", value: "500+" },
    Stat { label: "Опыт", value: "10 лет" },
    Stat { label: "Рейтинг", value: "5.0" },
];

pub const ABOUT_TEXT: &str = "Я практикующий психолог с 10-летним опытом работы. \
Специализируюсь на когнитивно-поведенческой терапии, работе с тревожными расстройствами \
и кризисными состояниями. Верю, что каждый человек способен изменить свою жизнь к лучшему, \
и моя задача — помочь найти этот путь.";

pub const CREDENTIALS: &[Credential] = &[
    Credential { title: "Образование", description: "МГУ, факультет психологии" },
    Credential { title: "Сертификаты", description: "КПТ, гештальт-терапия" },
    Credential { title: "Практика", description: "Более 2000 консультаций" },
];

pub const SERVICES: &[Service] = &[
    Service {
        title: "Индивидуальная терапия",
        description: "Работа с личными запросами, тревогой, депрессией, самооценкой",
    },
    Service {
        title: "Карьерное консультирование",
        description: "Помощь в выборе профессии, борьба с выгоранием, поиск баланса",
    },
    Service {
        title: "Работа с отношениями",
        description: "Построение здоровых границ, проработка паттернов поведения",
    },
    Service {
        title: "Кризисная поддержка",
        description: "Помощь в сложных жизненных ситуациях, утрата, развод, болезнь",
    },
    Service {
        title: "Личностный рост",
        description: "Развитие потенциала, поиск смысла, достижение целей",
    },
];

pub const FORMATS: &[ConsultationFormat] = &[
    ConsultationFormat {
        title: "Онлайн консультации",
        description: "Встречи через Zoom, Skype или WhatsApp. Комфортно, удобно, конфиденциально. \
Подходит для жителей любых городов.",
        highlights: ["Из любой точки мира", "Гибкий график", "Запись сессии по запросу"],
    },
    ConsultationFormat {
        title: "Очные встречи",
        description: "Личные консультации в уютном кабинете в центре Москвы. \
Располагающая атмосфера для глубокой работы.",
        highlights: ["Центр Москвы, м. Тверская", "Комфортное пространство", "Чай, кофе, вода"],
    },
];

pub const PRICE_PLANS: &[PricePlan] = &[
    PricePlan {
        title: "Онлайн консультация",
        price: "3 500 ₽",
        duration: "60 минут",
        features: ["Zoom/Skype/WhatsApp", "Гибкий график", "Запись сессии"],
        featured: false,
    },
    PricePlan {
        title: "Очная консультация",
        price: "5 000 ₽",
        duration: "60 минут",
        features: ["Центр Москвы", "Уютный кабинет", "Напитки включены"],
        featured: true,
    },
    PricePlan {
        title: "Пакет из 5 сессий",
        price: "18 000 ₽",
        duration: "онлайн",
        features: ["Экономия 5%", "Приоритет в записи", "Поддержка между сессиями"],
        featured: false,
    },
];

pub const TESTIMONIALS: &[Testimonial] = &[
    Testimonial {
        name: "Анна",
        text: "Невероятно благодарна за помощь! За полгода работы я научилась справляться \
с тревогой и обрела уверенность в себе. Рекомендую всем, кто ищет профессионала.",
        rating: 5,
    },
    Testimonial {
        name: "Дмитрий",
        text: "Работа с психологом помогла мне разобраться в семейных отношениях. Очень ценю \
деликатность и профессионализм. Онлайн формат оказался очень удобным.",
        rating: 5,
    },
    Testimonial {
        name: "Елена",
        text: "Пришла с запросом по карьере, а получила гораздо больше. Открыла в себе новые \
стороны, поняла свои истинные желания. Спасибо за чуткое сопровождение!",
        rating: 5,
    },
];

pub const BOOKING_INTRO: &str = "Заполните форму, и я свяжусь с вами в течение 24 часов";

pub const CONTACTS: &[ContactLine] = &[
    ContactLine { label: "Email", value: "psycholog@example.com" },
    ContactLine { label: "Телефон", value: "+7 (999) 123-45-67" },
    ContactLine { label: "Адрес", value: "Москва, ул. Тверская, 1" },
];

pub const OPENING_HOURS: &[OpeningHours] = &[
    OpeningHours { days: "Понедельник - Пятница", hours: "10:00 - 20:00" },
    OpeningHours { days: "Суббота", hours: "11:00 - 18:00" },
    OpeningHours { days: "Воскресенье", hours: "Выходной" },
];

pub const HOURS_NOTE: &str =
    "* Онлайн консультации доступны в удобное для вас время по предварительной записи";

pub const FOOTER_TAGLINE: &str = "Профессиональная психологическая помощь онлайн и в Москве";

pub const FOOTER_COPYRIGHT: &str = "© 2024 Все права защищены. Конфиденциальность гарантирована.";

/// Étoiles d'une note : 5 -> "★★★★★"
pub fn stars(rating: u8) -> String {
    "★".repeat(rating as usize)
}
