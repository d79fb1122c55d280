//! Fixed user-facing texts.
//!
//! Constants used with MarkdownV2 are already escaped; the rest go out as
//! plain text.

pub const WELCOME: &str = r"👋 *Добро пожаловать\!* Я бот для поиска информации о научных журналах и направлениях\.

📌 *Введите один из следующих запросов:*
 \- ISSN \(например, 1234\-5678\)
 \- Код направления \(например, 5\.3\.3 или 12\.00\.01\)
 \- Название журнала или направления \(например, Материаловедение\)";

pub const HELP: &str = r"ℹ️ *Справка и помощь*

Я бот для поиска информации о научных журналах и направлениях\. Вот список доступных команд:

📌 *Основные команды:*
  \- `/start` — Начать работу с ботом и получить приветственное сообщение\.
  \- `/help` — Получить справку о командах и примеры использования\.

📚 *Поиск информации:*
  \- `ISSN` \(например, `1234-5678`\) — Найти журнал по ISSN\.
  \- Код направления \(например, `5.3.3` или `12.00.01`\) — Показать журналы по указанному коду\.
  \- Название \(например, `Физическая культура`\) — Поиск по названию журнала или научного направления\.

🎯 *Дополнительные команды:*
  \- `/show_top N` — Показать только первые N журналов из последнего запроса \(например, `/show_top 5`\)\.

🛠️ *Примеры использования:*
  1️⃣ Отправьте `5.3.3` — я покажу журналы по этому направлению\.
  2️⃣ Отправьте часть названия журнала или направления, например, `Физическая культура`, чтобы увидеть совпадения\.
  3️⃣ Используйте `/show_top 10`, чтобы посмотреть топ\-10 из найденного списка\.

❓ Если у вас есть вопросы или предложения, напишите администратору\.";

pub const LIST_HEADER: &str = "📚 *Список найденных журналов:*\n\n";

pub const LIST_FOOTER: &str = "\n💡 Если хотите увидеть только определённое количество журналов, введите `/show_top N`, где N — число журналов, которые нужно отобразить\\.";

pub const ISSN_NOT_FOUND: &str = "❌ Журнал с таким ISSN не найден.";
pub const DIRECTION_CODE_NOT_FOUND: &str = "❌ Журналы с таким кодом направления не найдены.";
pub const NAME_NOT_FOUND: &str = "❌ Ничего не найдено по вашему запросу.";

pub const QUERY_FAILED: &str = "❌ Ошибка при выполнении запроса.";
pub const UNEXPECTED_FAILURE: &str = "❌ Произошла ошибка. Попробуйте позже.";

pub const SHOW_TOP_USAGE: &str = "❌ Введите число после команды, например: /show_top 5";
pub const NO_PREVIOUS_LIST: &str =
    "❌ Вы ещё не запрашивали список журналов. Сначала выполните поиск.";
pub const EMPTY_QUERY: &str = "❌ Введите ISSN, код направления или название журнала.";

pub fn top_header(n: usize) -> String {
    format!("📚 *Топ {} журналов:*\n\n", n)
}

pub fn list_shorter_than_requested(len: usize) -> String {
    format!("⚠️ В вашем списке всего {} журналов.", len)
}
