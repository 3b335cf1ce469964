//! User-facing message texts (Russian)

pub const WELCOME: &str = "Привет! Я бот Марии Петровны — репетитора по математике 👩‍🏫\n\n\
Помогу записаться на занятия, отправить ДЗ на проверку или ответить на вопросы.\n\n\
Выберите, что вас интересует:";

pub const ABOUT: &str = "📘 *О занятиях*\n\n\
— Группы до 4 человек и индивидуальные занятия\n\
— Онлайн или очно\n\
— Будни: 15:00–20:00, суббота: 10:00–14:00\n\
— Длительность занятия: 60–90 минут в зависимости от класса\n\n\
Первое занятие — диагностическое, бесплатно.";

pub const REVIEWS: &str = "⭐ *Отзывы*\n\n\
«За полгода подняли оценку с тройки до пятёрки» — мама Артёма, 7 класс\n\
«ОГЭ на отлично, спасибо!» — Ксения, 9 класс\n\
«Очень понятно объясняет, сын перестал бояться контрольных» — мама Миши, 5 класс";

pub const FAQ_TEXT: &str = "❓ *Частые вопросы*\n\n\
*Сколько стоит занятие?*\n\
Группа — от 800 ₽, индивидуально — от 1500 ₽. Оплата помесячно.\n\n\
*Что нужно для начала?*\n\
Записаться на бесплатную диагностику — кнопка «Записаться в группу».\n\n\
*Можно ли пропускать занятия?*\n\
Да, пропущенное занятие переносится или компенсируется материалами.";

pub const DIAG: &str = "🧪 *Мини-диагностика (1 минута)*\n\n\
Ответьте честно — я подскажу, какая группа подойдёт.\n\n\
1) Какая цель?\n\
— подтянуть оценки\n\
— ОГЭ\n\
— ЕГЭ\n\n\
Нажмите *Записаться* — и в заявке укажите цель и класс 🙂";

pub const ASK_QUESTION_HINT: &str = "💬 Напишите ваш вопрос одним сообщением — я передам его преподавателю.";

pub const SUPPORT_EMPTY: &str = "Напишите вопрос текстом одним сообщением 🙂";

pub const SUPPORT_DONE: &str = "✅ Принято! Я отвечу вам в ближайшее время.";

pub const LEAD_START: &str = "🗓 *Запись в группу*\n\nВыберите класс ученика:";

pub const LEAD_GOAL_PROMPT: &str = "🎯 Какая цель занятий?";

pub const LEAD_TIME_PROMPT: &str = "🕒 Когда удобнее заниматься?";

pub const LEAD_CONTACT_PROMPT: &str = "📱 Оставьте контакт для связи (например, номер или @ник).\n\
Можно просто отправить @username, если так удобнее.";

pub const LEAD_CONTACT_EMPTY: &str = "Напишите контакт текстом 🙂";

pub const LEAD_DONE: &str = "✅ Заявка отправлена!\n\nЯ свяжусь с вами, как только преподаватель её посмотрит.";

pub const LEAD_APPROVED_USER: &str = "✅ Заявка подтверждена!\n\nЯ напишу вам детали по группе и времени занятий.";

pub const LEAD_REJECTED_USER: &str = "Спасибо за заявку! Сейчас подходящих мест нет 😔\n\
Я могу предложить другое время/формат — напишите, пожалуйста, в ответ.";

pub const HW_START: &str = "📝 *Проверка ДЗ*\n\nВыберите класс ученика:";

pub const HW_TOPIC_PROMPT: &str = "📌 Выберите тему:";

pub const HW_PAYLOAD_PROMPT: &str = "Отправьте ДЗ одним сообщением:\n\
— текст\n\
— или фото\n\
— или файл (pdf/word/картинка)\n\n\
Можно добавить подпись: где застряли / что не понятно.";

pub const HW_PAYLOAD_EMPTY: &str = "Отправьте ДЗ текстом, фото или файлом одним сообщением 🙂";

pub const HW_DONE: &str = "✅ ДЗ отправлено на проверку!\n\nКак только преподаватель посмотрит — я напишу.";

pub const HW_ACCEPTED_USER: &str = "✅ ДЗ проверено: *Принято*.\n\nЕсли хотите — отправьте следующее 🙂";

pub const HW_REWORK_USER: &str = "🔁 ДЗ проверено: *Нужно доработать*.\n\nЕсли хотите — отправьте исправленную версию.";

pub const UNKNOWN_TEXT: &str = "Я не совсем понял 🙂\n\
Выберите действие в меню или напишите вопрос через «Задать вопрос».";

pub const TRY_AGAIN_LATER: &str = "Что-то пошло не так 😔 Попробуйте ещё раз чуть позже.";

pub const LEAD_GO_MENU: &str = "Ок, давайте запишемся 👇";

pub const HW_GO_MENU: &str = "Ок, отправим ДЗ на проверку 👇";

// Тексты для администратора.

pub const ADMIN_DONE: &str = "Готово ✅";

pub const ADMIN_LEAD_NOT_FOUND: &str = "Заявка не найдена";

pub const ADMIN_HW_NOT_FOUND: &str = "ДЗ не найдено";

pub const ADMIN_COMMENT_PROMPT: &str = "💬 Напишите комментарий одним сообщением — я перешлю его ученику.";

pub const ADMIN_COMMENT_EMPTY: &str = "Комментарий должен быть текстом. Напишите одним сообщением 🙂";

pub const ADMIN_COMMENT_SENT: &str = "Комментарий отправлен ✅";
