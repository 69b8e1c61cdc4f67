//! Built-in starter sentences.

use crate::domain::Sentence;

const SAMPLE: &[(&str, &str, &str, u32)] = &[
    ("Bonjour", "你好", "Hello", 1),
    ("Bonsoir", "晚上好", "Good evening", 1),
    ("Au revoir", "再见", "Goodbye", 1),
    ("Merci", "谢谢", "Thank you", 1),
    ("Merci beaucoup", "非常感谢", "Thank you very much", 1),
    ("S'il vous plaît", "请", "Please", 1),
    ("Excusez-moi", "打扰一下", "Excuse me", 2),
    ("Oui", "是", "Yes", 2),
    ("Non", "不是", "No", 2),
    ("Je m'appelle...", "我叫...", "My name is...", 2),
    ("Comment vous appelez-vous ?", "您叫什么名字？", "What is your name?", 2),
    ("Je suis chinois", "我是中国人（男）", "I am Chinese (male)", 3),
    ("Je suis chinoise", "我是中国人（女）", "I am Chinese (female)", 3),
    ("Parlez-vous anglais ?", "您说英语吗？", "Do you speak English?", 3),
    ("Je ne comprends pas", "我不明白", "I don't understand", 3),
    ("Comment allez-vous ?", "您好吗？", "How are you?", 4),
    ("Très bien, merci", "很好，谢谢", "Very well, thank you", 4),
    ("Je voudrais un café", "我想要一杯咖啡", "I would like a coffee", 4),
    ("Où est la gare ?", "火车站在哪里？", "Where is the train station?", 5),
    ("Combien ça coûte ?", "这个多少钱？", "How much does it cost?", 5),
];

/// Twenty beginner sentences across lessons 1 to 5, ids 1 to 20.
pub fn sample_sentences() -> Vec<Sentence> {
    SAMPLE
        .iter()
        .zip(1..)
        .map(|(&(fr, native, secondary, lesson), id)| {
            Sentence::new(id, fr, native, secondary).with_lesson(lesson)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_ids_are_sequential() {
        let sentences = sample_sentences();
        assert_eq!(sentences.len(), 20);
        for (i, s) in sentences.iter().enumerate() {
            assert_eq!(s.id, i as u64 + 1);
        }
        assert_eq!(sentences[0].fr, "Bonjour");
        assert_eq!(sentences[19].lesson, Some(5));
    }
}
